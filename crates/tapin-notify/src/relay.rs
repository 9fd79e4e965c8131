// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP relay notifier.
//!
//! POSTs each [`EmailRequest`] as JSON to the configured relay endpoint,
//! which owns templating and actual delivery. One request per email, no
//! retry: a dropped notification is acceptable, a duplicate one is not.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use tapin_config::model::NotifyConfig;
use tapin_core::{
    AdapterType, EmailRequest, HealthStatus, KioskAdapter, KioskError, Notifier,
};

/// Notifier that forwards email requests to an HTTP relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    /// Creates a relay notifier from the validated configuration section.
    pub fn new(config: &NotifyConfig) -> Result<Self, KioskError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| KioskError::Config("notify.endpoint is not set".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| KioskError::notify("failed to build HTTP client", e))?;
        Ok(Self { client, endpoint })
    }

    /// Overrides the endpoint (for testing with wiremock).
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }
}

#[async_trait]
impl KioskAdapter for HttpNotifier {
    fn name(&self) -> &str {
        "http-relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, KioskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), KioskError> {
        debug!("relay notifier shutting down");
        Ok(())
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, request: &EmailRequest) -> Result<(), KioskError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| KioskError::notify("relay request failed", e))?;

        let status = response.status();
        debug!(status = %status, student = %request.student_name, "relay response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KioskError::Notify {
                message: format!("relay returned {status}: {body}"),
                source: None,
            });
        }
        Ok(())
    }
}
