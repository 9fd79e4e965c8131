// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notifier that captures sent emails.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use tapin_core::{AdapterType, EmailRequest, HealthStatus, KioskAdapter, KioskError, Notifier};

/// A notifier for testing: every send is captured for assertion, and sends
/// can be made to fail to exercise the worker's logging path.
pub struct MockNotifier {
    sent: Mutex<Vec<EmailRequest>>,
    attempts: AtomicUsize,
    fail_send: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            fail_send: AtomicBool::new(false),
        }
    }

    /// Every request passed to `send()` so far, in order.
    pub fn sent(&self) -> Vec<EmailRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Number of `send()` calls made so far, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Make subsequent sends fail.
    pub fn fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KioskAdapter for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
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
        Ok(())
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, request: &EmailRequest) -> Result<(), KioskError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(KioskError::Notify {
                message: "injected send failure".to_string(),
                source: None,
            });
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }
}
