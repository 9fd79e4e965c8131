// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tapin attendance kiosk.

use thiserror::Error;

/// The primary error type used across all Tapin adapter traits and the
/// scan pipeline.
///
/// Non-failure scan results (already recorded, invalid badge, unknown
/// student) are *not* errors; they are [`ScanOutcome`](crate::ScanOutcome)
/// variants. `KioskError` covers infrastructure faults only, and every
/// variant is terminal at the pipeline boundary: the kiosk logs it,
/// signals the error cue, and keeps accepting frames.
#[derive(Debug, Error)]
pub enum KioskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Attendance store errors (HTTP failure, bad payload, unexpected status).
    #[error("store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Notification relay errors (request construction, HTTP failure).
    #[error("notify error: {message}")]
    Notify {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frame source errors (scanner hardware, closed input).
    #[error("scanner error: {message}")]
    Scanner {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl KioskError {
    /// Wrap an external error as a store failure.
    pub fn store(message: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        KioskError::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap an external error as a notify failure.
    pub fn notify(message: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        KioskError::Notify {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
