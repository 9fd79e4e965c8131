// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tapin badge` command implementation.
//!
//! Renders the QR payload for a student identifier: the plain id is run
//! through the badge cipher and prefixed with the sentinel, exactly what
//! the kiosk expects to decode at the door.

use qrcode::QrCode;
use qrcode::render::unicode;

use tapin_config::model::TapinConfig;
use tapin_core::{KioskError, StudentId, codec};

/// Runs the `tapin badge` command.
pub fn run_badge(config: &TapinConfig, student_id: &str) -> Result<(), KioskError> {
    if student_id.trim().is_empty() {
        return Err(KioskError::Config("student id must not be empty".into()));
    }

    let id = StudentId(student_id.trim().to_string());
    let payload = codec::badge_payload(&id, &config.kiosk.sentinel_prefix);

    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| KioskError::Internal(format!("cannot build QR code: {e}")))?;
    let image = code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build();

    println!("{image}");
    println!("student: {id}");
    println!("payload: {payload}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_through_the_kiosk_decoder() {
        let config = TapinConfig::default();
        let id = StudentId("S001".into());
        let payload = codec::badge_payload(&id, &config.kiosk.sentinel_prefix);
        assert_eq!(
            codec::student_id(&payload, &config.kiosk.sentinel_prefix),
            Some(id)
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let config = TapinConfig::default();
        assert!(run_badge(&config, "   ").is_err());
    }
}
