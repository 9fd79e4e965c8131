// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-of-day window classification.
//!
//! Classification is a pure function of local wall-clock time and must be
//! recomputed on every call: it is evaluated both per-scan and by the
//! periodic mode banner task, and caching across calls would let the two
//! disagree around a boundary.

use chrono::NaiveTime;

use tapin_core::{KioskError, Window};
use tapin_config::model::WindowConfig;

/// Configured check-in window boundaries.
///
/// The check-in window is `[check_in_start, check_in_end)`, half-open on the
/// start. Any instant outside it -- before the morning window as well as
/// after it -- classifies as check-out by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    check_in_start: NaiveTime,
    check_in_end: NaiveTime,
}

impl WindowBounds {
    /// Build window bounds, rejecting an empty or inverted check-in window.
    pub fn new(check_in_start: NaiveTime, check_in_end: NaiveTime) -> Result<Self, KioskError> {
        if check_in_start >= check_in_end {
            return Err(KioskError::Config(format!(
                "check-in window start ({check_in_start}) must be before end ({check_in_end})"
            )));
        }
        Ok(Self {
            check_in_start,
            check_in_end,
        })
    }

    /// Build window bounds from the validated configuration section.
    pub fn from_config(config: &WindowConfig) -> Result<Self, KioskError> {
        let start = config.check_in_start_time().ok_or_else(|| {
            KioskError::Config(format!(
                "window.check_in_start `{}` is not HH:MM",
                config.check_in_start
            ))
        })?;
        let end = config.check_in_end_time().ok_or_else(|| {
            KioskError::Config(format!(
                "window.check_in_end `{}` is not HH:MM",
                config.check_in_end
            ))
        })?;
        Self::new(start, end)
    }

    /// Classify a local time of day into its window.
    pub fn classify(&self, time: NaiveTime) -> Window {
        if time >= self.check_in_start && time < self.check_in_end {
            Window::CheckIn
        } else {
            Window::CheckOut
        }
    }
}
