// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as parseable `HH:MM` times, ordered window boundaries,
//! and sane offsets.

use crate::diagnostic::ConfigError;
use crate::model::{parse_hhmm, TapinConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TapinConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.kiosk.sentinel_prefix.is_empty() {
        errors.push(ConfigError::Validation {
            message: "kiosk.sentinel_prefix must not be empty".to_string(),
        });
    }

    if !(-12..=14).contains(&config.kiosk.utc_offset_hours) {
        errors.push(ConfigError::Validation {
            message: format!(
                "kiosk.utc_offset_hours must be between -12 and 14, got {}",
                config.kiosk.utc_offset_hours
            ),
        });
    }

    if config.kiosk.activity_log_size == 0 {
        errors.push(ConfigError::Validation {
            message: "kiosk.activity_log_size must be at least 1".to_string(),
        });
    }

    let start = parse_hhmm(&config.window.check_in_start);
    if start.is_none() {
        errors.push(ConfigError::Validation {
            message: format!(
                "window.check_in_start `{}` is not a valid HH:MM time",
                config.window.check_in_start
            ),
        });
    }

    let end = parse_hhmm(&config.window.check_in_end);
    if end.is_none() {
        errors.push(ConfigError::Validation {
            message: format!(
                "window.check_in_end `{}` is not a valid HH:MM time",
                config.window.check_in_end
            ),
        });
    }

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            errors.push(ConfigError::Validation {
                message: format!(
                    "window.check_in_start ({start}) must be before window.check_in_end ({end})"
                ),
            });
        }
    }

    if config.window.mode_refresh_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "window.mode_refresh_secs must be at least 1".to_string(),
        });
    }

    if parse_hhmm(&config.reset.at).is_none() {
        errors.push(ConfigError::Validation {
            message: format!("reset.at `{}` is not a valid HH:MM time", config.reset.at),
        });
    }

    if config.reset.poll_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "reset.poll_secs must be at least 1".to_string(),
        });
    }

    if let Some(url) = &config.store.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("store.base_url `{url}` must be an http(s) URL"),
            });
        }
    }

    if config.store.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "store.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(endpoint) = &config.notify.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("notify.endpoint `{endpoint}` must be an http(s) URL"),
            });
        }
    }

    if config.notify.queue_size == 0 {
        errors.push(ConfigError::Validation {
            message: "notify.queue_size must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
