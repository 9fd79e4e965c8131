// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attendance store adapter trait for the remote document store.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::KioskError;
use crate::traits::adapter::KioskAdapter;
use crate::types::{AttendanceRecord, DayEntry, StudentId};

/// Adapter for the remote per-student attendance document store.
///
/// The store is treated as a key-value document store keyed by student
/// identifier. The pipeline performs a read-modify-write of the whole
/// `attendance` map per scan; the store offers no field-level atomicity and
/// last-writer-wins at map granularity is acceptable for single-kiosk use.
#[async_trait]
pub trait AttendanceStore: KioskAdapter {
    /// Fetch the attendance document for a student.
    ///
    /// Returns `Ok(None)` when no document exists for the identifier.
    async fn fetch(&self, id: &StudentId) -> Result<Option<AttendanceRecord>, KioskError>;

    /// Merge the full attendance map back into the student's document,
    /// leaving other document fields untouched.
    async fn merge(
        &self,
        id: &StudentId,
        attendance: &BTreeMap<String, DayEntry>,
    ) -> Result<(), KioskError>;
}
