// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Tapin workspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Plain student identifier, i.e. the decoded badge payload with the
/// sentinel prefix already stripped. Keys the remote attendance document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check-in/check-out timestamp pair for one student on one calendar date.
///
/// Slots are written at most once: a non-null slot is never overwritten by a
/// later scan on the same date. Field names match the remote document format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(rename = "checkIn")]
    pub check_in: Option<String>,
    #[serde(rename = "checkOut")]
    pub check_out: Option<String>,
}

/// Per-student attendance document owned by the remote store.
///
/// `attendance` maps local calendar dates (`YYYY-MM-DD`) to day entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attendance: BTreeMap<String, DayEntry>,
}

impl AttendanceRecord {
    /// Display name, defaulting to `"Unknown"` when the document has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Which time-of-day window a scan falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Window {
    #[strum(serialize = "check-in")]
    CheckIn,
    #[strum(serialize = "check-out")]
    CheckOut,
}

impl Window {
    /// Banner text shown on the kiosk surface.
    pub fn banner(&self) -> &'static str {
        match self {
            Window::CheckIn => "Check-In Mode",
            Window::CheckOut => "Check-Out Mode",
        }
    }
}

/// Result of processing one camera frame through the scan pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A check-in timestamp was written for today.
    CheckedIn { id: StudentId, name: String },
    /// A check-out timestamp was written for today.
    CheckedOut { id: StudentId, name: String },
    /// The relevant slot was already filled; idempotent no-op.
    AlreadyRecorded { id: StudentId, name: String },
    /// The identifier was already processed (or in flight) this session.
    AlreadyScanned { id: StudentId, throttled: bool },
    /// Decoded text lacked the sentinel prefix; nothing was mutated.
    InvalidCode,
    /// The store has no document for this identifier.
    UnknownStudent { id: StudentId },
    /// A store read or write failed; the identifier stays marked done.
    StoreFailure { id: StudentId },
    /// The frame source reported a hardware/decode error.
    ScannerFault,
}

/// An event delivered by a frame source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The camera/decoder produced raw QR text.
    Decoded(String),
    /// The scanner reported a hardware or decode error.
    Fault(String),
}

/// One row of the bounded recent-activity log, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: StudentId,
    /// Local time of day, formatted `HH:MM:SS`.
    pub time: String,
    pub student_name: String,
}

/// Guardian contact looked up per student for the notification relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianContact {
    pub email: String,
    pub token: String,
}

/// Mapping from student identifier to guardian contact.
///
/// Students without an entry simply get no notification; a missing contact
/// is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuardianDirectory {
    contacts: BTreeMap<String, GuardianContact>,
}

impl GuardianDirectory {
    pub fn new(contacts: BTreeMap<String, GuardianContact>) -> Self {
        Self { contacts }
    }

    pub fn get(&self, id: &StudentId) -> Option<&GuardianContact> {
        self.contacts.get(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// One-shot outbound email request; constructed once per successful write,
/// consumed by the notify worker, never retried from the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub title: String,
    #[serde(rename = "studentName")]
    pub student_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub token: String,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`KioskAdapter`](crate::KioskAdapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Store,
    Notifier,
    Scanner,
}
