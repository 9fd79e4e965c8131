// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wall-clock abstraction so window classification, timestamps, and the
//! daily reset can be tested without real time.

use chrono::{DateTime, FixedOffset, Utc};

use tapin_core::KioskError;

pub use tapin_core::Clock;

/// System clock pinned to a fixed UTC offset.
///
/// The deployment timezone (Asia/Manila, +08:00) has no DST, so a fixed
/// offset is sufficient and keeps classification a pure function of UTC.
#[derive(Debug, Clone)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Build a system clock for a whole-hour UTC offset.
    pub fn with_offset_hours(hours: i8) -> Result<Self, KioskError> {
        let offset = FixedOffset::east_opt(i32::from(hours) * 3600)
            .ok_or_else(|| KioskError::Config(format!("invalid UTC offset: {hours}h")))?;
        Ok(Self { offset })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Full local timestamp, `YYYY-MM-DDTHH:MM:SS` (remote document format).
pub fn timestamp(now: &DateTime<FixedOffset>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Local calendar date, `YYYY-MM-DD` (attendance map key).
pub fn date_key(now: &DateTime<FixedOffset>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Local time of day, `HH:MM:SS` (activity log display).
pub fn log_time(now: &DateTime<FixedOffset>) -> String {
    now.format("%H:%M:%S").to_string()
}
