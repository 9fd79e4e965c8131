// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock attendance store for deterministic testing.
//!
//! `MockStore` implements `AttendanceStore` over an in-memory map, records
//! every merge for assertion, and can be switched into failure modes to
//! exercise the pipeline's error paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use tapin_core::{
    AdapterType, AttendanceRecord, AttendanceStore, DayEntry, HealthStatus, KioskAdapter,
    KioskError, StudentId,
};

/// An in-memory attendance store for testing.
pub struct MockStore {
    records: Mutex<HashMap<String, AttendanceRecord>>,
    merges: Mutex<Vec<(StudentId, BTreeMap<String, DayEntry>)>>,
    fetch_count: AtomicUsize,
    fetch_delay_ms: AtomicU64,
    fail_fetch: AtomicBool,
    fail_merge: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            merges: Mutex::new(Vec::new()),
            fetch_count: AtomicUsize::new(0),
            fetch_delay_ms: AtomicU64::new(0),
            fail_fetch: AtomicBool::new(false),
            fail_merge: AtomicBool::new(false),
        }
    }

    /// Seed a student document.
    pub fn insert(&self, id: &str, record: AttendanceRecord) {
        self.records.lock().unwrap().insert(id.to_string(), record);
    }

    /// Current state of a student document, if any.
    pub fn record(&self, id: &str) -> Option<AttendanceRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    /// Every merge call made so far, in order.
    pub fn merges(&self) -> Vec<(StudentId, BTreeMap<String, DayEntry>)> {
        self.merges.lock().unwrap().clone()
    }

    /// Number of fetch calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Delay every fetch, to keep a round-trip outstanding while more
    /// frames arrive.
    pub fn set_fetch_delay(&self, delay: Duration) {
        self.fetch_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make subsequent fetches fail.
    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent merges fail.
    pub fn fail_merge(&self, fail: bool) {
        self.fail_merge.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KioskAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, KioskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), KioskError> {
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MockStore {
    async fn fetch(&self, id: &StudentId) -> Result<Option<AttendanceRecord>, KioskError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let delay_ms = self.fetch_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(KioskError::Store {
                message: "injected fetch failure".to_string(),
                source: None,
            });
        }
        Ok(self.records.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn merge(
        &self,
        id: &StudentId,
        attendance: &BTreeMap<String, DayEntry>,
    ) -> Result<(), KioskError> {
        if self.fail_merge.load(Ordering::SeqCst) {
            return Err(KioskError::Store {
                message: "injected merge failure".to_string(),
                source: None,
            });
        }
        self.merges
            .lock()
            .unwrap()
            .push((id.clone(), attendance.clone()));
        let mut records = self.records.lock().unwrap();
        let record = records.entry(id.as_str().to_string()).or_default();
        record.attendance = attendance.clone();
        Ok(())
    }
}
