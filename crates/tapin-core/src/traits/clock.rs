// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wall-clock seam.

use chrono::{DateTime, FixedOffset};

/// Source of the kiosk's local wall-clock time.
///
/// Window classification, attendance timestamps, and the daily reset all
/// read through this trait so they can be driven by test clocks.
pub trait Clock: Send + Sync + 'static {
    /// Current instant in the school's local timezone.
    fn now(&self) -> DateTime<FixedOffset>;
}
