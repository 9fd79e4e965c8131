// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait implemented by every external collaborator.

use async_trait::async_trait;

use crate::error::KioskError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for Tapin collaborator adapters.
///
/// Every adapter (store, notifier, scanner) implements this trait, which
/// provides identity, health check, and shutdown capabilities.
#[async_trait]
pub trait KioskAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of adapter (store, notifier, scanner).
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, KioskError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), KioskError>;
}
