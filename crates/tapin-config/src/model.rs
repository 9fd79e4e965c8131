// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tapin attendance kiosk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Top-level Tapin configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TapinConfig {
    /// Kiosk identity and general behavior settings.
    #[serde(default)]
    pub kiosk: KioskSection,

    /// Check-in/check-out window boundaries.
    #[serde(default)]
    pub window: WindowConfig,

    /// Daily session reset settings.
    #[serde(default)]
    pub reset: ResetConfig,

    /// Visual/audio feedback timing.
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Remote attendance store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Guardian notification relay settings.
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Parse a `HH:MM` wall-clock string.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Kiosk identity and general behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KioskSection {
    /// Display name of the kiosk.
    #[serde(default = "default_kiosk_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Sentinel prefix a decoded badge payload must start with.
    #[serde(default = "default_sentinel_prefix")]
    pub sentinel_prefix: String,

    /// Fixed UTC offset of the school's local time, in hours.
    /// Default +8 (Asia/Manila, no DST).
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i8,

    /// Maximum number of rows kept in the recent-activity log.
    #[serde(default = "default_activity_log_size")]
    pub activity_log_size: usize,
}

impl Default for KioskSection {
    fn default() -> Self {
        Self {
            name: default_kiosk_name(),
            log_level: default_log_level(),
            sentinel_prefix: default_sentinel_prefix(),
            utc_offset_hours: default_utc_offset_hours(),
            activity_log_size: default_activity_log_size(),
        }
    }
}

fn default_kiosk_name() -> String {
    "tapin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sentinel_prefix() -> String {
    "mvba_".to_string()
}

fn default_utc_offset_hours() -> i8 {
    8
}

fn default_activity_log_size() -> usize {
    10
}

/// Check-in/check-out window configuration.
///
/// The check-in window is `[check_in_start, check_in_end)`, half-open.
/// Any instant outside it classifies as check-out by convention.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// Start of the check-in window, `HH:MM` local time (inclusive).
    #[serde(default = "default_check_in_start")]
    pub check_in_start: String,

    /// End of the check-in window, `HH:MM` local time (exclusive).
    #[serde(default = "default_check_in_end")]
    pub check_in_end: String,

    /// How often the mode banner reclassifies the current window, in seconds.
    #[serde(default = "default_mode_refresh_secs")]
    pub mode_refresh_secs: u64,
}

impl WindowConfig {
    /// Parsed check-in start, `None` when the string is malformed.
    pub fn check_in_start_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.check_in_start)
    }

    /// Parsed check-in end, `None` when the string is malformed.
    pub fn check_in_end_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.check_in_end)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            check_in_start: default_check_in_start(),
            check_in_end: default_check_in_end(),
            mode_refresh_secs: default_mode_refresh_secs(),
        }
    }
}

fn default_check_in_start() -> String {
    "06:00".to_string()
}

fn default_check_in_end() -> String {
    "10:00".to_string()
}

fn default_mode_refresh_secs() -> u64 {
    60
}

/// Daily session reset configuration.
///
/// The reset clears the dedup guard and activity log; it must land between
/// the check-out window's useful hours and the next morning's check-in.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResetConfig {
    /// Local time of day the session reset fires, `HH:MM`.
    #[serde(default = "default_reset_at")]
    pub at: String,

    /// How often the reset trigger is polled, in seconds.
    #[serde(default = "default_reset_poll_secs")]
    pub poll_secs: u64,
}

impl ResetConfig {
    /// Parsed reset instant, `None` when the string is malformed.
    pub fn at_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.at)
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            at: default_reset_at(),
            poll_secs: default_reset_poll_secs(),
        }
    }
}

fn default_reset_at() -> String {
    "16:00".to_string()
}

fn default_reset_poll_secs() -> u64 {
    60
}

/// Visual/audio feedback timing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackConfig {
    /// How long a cue stays on screen before reverting to neutral, in ms.
    #[serde(default = "default_revert_ms")]
    pub revert_ms: u64,

    /// Minimum gap between two "already scanned" cues, in ms. Prevents
    /// audio spam from a badge sitting in the camera's field of view.
    #[serde(default = "default_already_scanned_throttle_ms")]
    pub already_scanned_throttle_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            revert_ms: default_revert_ms(),
            already_scanned_throttle_ms: default_already_scanned_throttle_ms(),
        }
    }
}

fn default_revert_ms() -> u64 {
    1000
}

fn default_already_scanned_throttle_ms() -> u64 {
    1500
}

/// Remote attendance store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the attendance document store. Required for `serve`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token for store authentication.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

fn default_store_timeout_secs() -> u64 {
    10
}

/// Guardian notification relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Relay endpoint the email requests are POSTed to. `None` disables
    /// notifications entirely.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Path to the guardian contacts TOML file (student id -> email, token).
    #[serde(default)]
    pub contacts_path: Option<String>,

    /// Bound of the in-process email queue; requests beyond it are dropped.
    #[serde(default = "default_notify_queue_size")]
    pub queue_size: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            contacts_path: None,
            queue_size: default_notify_queue_size(),
        }
    }
}

fn default_notify_queue_size() -> usize {
    32
}
