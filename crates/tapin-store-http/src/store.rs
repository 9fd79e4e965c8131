// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the attendance document API.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

use tapin_config::model::StoreConfig;
use tapin_core::{
    AdapterType, AttendanceRecord, AttendanceStore, DayEntry, HealthStatus, KioskAdapter,
    KioskError, StudentId,
};

/// PATCH body: only the attendance map is merged, other document fields
/// (name, etc.) are owned by the roster system and never written by the
/// kiosk.
#[derive(Debug, Serialize)]
struct MergeBody<'a> {
    attendance: &'a BTreeMap<String, DayEntry>,
}

/// HTTP client for the remote attendance document store.
///
/// Manages authentication headers, request timeouts, and retry logic for
/// transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct HttpAttendanceStore {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HttpAttendanceStore {
    /// Creates a store client from the validated configuration section.
    pub fn new(config: &StoreConfig) -> Result<Self, KioskError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| KioskError::Config("store.base_url is not set".to_string()))?;

        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| KioskError::Config(format!("invalid store API key: {e}")))?;
            headers.insert("authorization", value);
        }
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KioskError::store("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn student_url(&self, id: &StudentId) -> String {
        format!("{}/students/{}", self.base_url, id)
    }
}

#[async_trait]
impl KioskAdapter for HttpAttendanceStore {
    fn name(&self) -> &str {
        "http-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, KioskError> {
        // A full check would probe the document API, but scans already
        // surface store failures per badge; report on the client instead.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), KioskError> {
        debug!("attendance store shutting down");
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for HttpAttendanceStore {
    async fn fetch(&self, id: &StudentId) -> Result<Option<AttendanceRecord>, KioskError> {
        let url = self.student_url(id);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, student = %id, "retrying fetch after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| KioskError::store("fetch request failed", e))?;

            let status = response.status();
            debug!(status = %status, attempt, student = %id, "fetch response received");

            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if status.is_success() {
                let record = response
                    .json::<AttendanceRecord>()
                    .await
                    .map_err(|e| KioskError::store("failed to parse attendance document", e))?;
                return Ok(Some(record));
            }

            if is_transient_error(status) && attempt < self.max_retries {
                last_error = Some(KioskError::Store {
                    message: format!("store returned {status}"),
                    source: None,
                });
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(KioskError::Store {
                message: format!("store returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| KioskError::Store {
            message: "fetch failed after retries".to_string(),
            source: None,
        }))
    }

    async fn merge(
        &self,
        id: &StudentId,
        attendance: &BTreeMap<String, DayEntry>,
    ) -> Result<(), KioskError> {
        let url = self.student_url(id);
        let body = MergeBody { attendance };
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, student = %id, "retrying merge after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .patch(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| KioskError::store("merge request failed", e))?;

            let status = response.status();
            debug!(status = %status, attempt, student = %id, "merge response received");

            if status.is_success() {
                return Ok(());
            }

            if is_transient_error(status) && attempt < self.max_retries {
                last_error = Some(KioskError::Store {
                    message: format!("store returned {status}"),
                    source: None,
                });
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            return Err(KioskError::Store {
                message: format!("store returned {status}: {text}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| KioskError::Store {
            message: "merge failed after retries".to_string(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
