// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier adapter trait for the outbound guardian email relay.

use async_trait::async_trait;

use crate::error::KioskError;
use crate::traits::adapter::KioskAdapter;
use crate::types::EmailRequest;

/// Adapter for the one-way guardian notification relay.
///
/// The scan pipeline never awaits a send; requests travel over a channel to
/// a background worker which calls this trait. Failures are logged by the
/// worker and otherwise ignored -- there is no retry and no user-visible
/// error distinct from normal operation.
#[async_trait]
pub trait Notifier: KioskAdapter {
    /// Deliver one email request to the relay endpoint.
    async fn send(&self, request: &EmailRequest) -> Result<(), KioskError>;
}
