// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tapin attendance kiosk.
//!
//! This crate provides the foundational trait definitions, error types,
//! shared domain types, and the badge payload codec used throughout the
//! Tapin workspace. Collaborator adapters (store, notifier, scanner)
//! implement traits defined here.

pub mod codec;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KioskError;
pub use types::{
    ActivityEntry, AdapterType, AttendanceRecord, DayEntry, EmailRequest, GuardianContact,
    GuardianDirectory, HealthStatus, ScanEvent, ScanOutcome, StudentId, Window,
};

// Re-export all adapter traits at crate root.
pub use traits::{AttendanceStore, Clock, FrameSource, KioskAdapter, Notifier};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kiosk_error_has_all_variants() {
        let _config = KioskError::Config("test".into());
        let _store = KioskError::Store {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _notify = KioskError::Notify {
            message: "test".into(),
            source: None,
        };
        let _scanner = KioskError::Scanner {
            message: "test".into(),
            source: None,
        };
        let _timeout = KioskError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = KioskError::Internal("test".into());
    }

    #[test]
    fn adapter_type_round_trips_through_display() {
        for variant in [AdapterType::Store, AdapterType::Notifier, AdapterType::Scanner] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn window_display_and_banner() {
        assert_eq!(Window::CheckIn.to_string(), "check-in");
        assert_eq!(Window::CheckOut.to_string(), "check-out");
        assert_eq!(Window::CheckIn.banner(), "Check-In Mode");
        assert_eq!(Window::CheckOut.banner(), "Check-Out Mode");
    }

    #[test]
    fn day_entry_serializes_with_remote_field_names() {
        let entry = DayEntry {
            check_in: Some("2024-06-01T07:00:00".to_string()),
            check_out: None,
        };
        let json = serde_json::to_string(&entry).expect("should serialize");
        assert!(json.contains("\"checkIn\""));
        assert!(json.contains("\"checkOut\":null"));
        let parsed: DayEntry = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed, entry);
    }

    #[test]
    fn record_display_name_defaults_to_unknown() {
        let record = AttendanceRecord::default();
        assert_eq!(record.display_name(), "Unknown");

        let named = AttendanceRecord {
            name: Some("Cruz, Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(named.display_name(), "Cruz, Ana");
    }

    #[test]
    fn record_deserializes_with_missing_fields() {
        let record: AttendanceRecord = serde_json::from_str("{}").expect("empty doc is valid");
        assert!(record.name.is_none());
        assert!(record.attendance.is_empty());
    }
}
