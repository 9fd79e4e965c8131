// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapter for the remote attendance document store.
//!
//! Speaks a plain JSON document API: `GET /students/{id}` returns the
//! per-student attendance document (404 means no document), and
//! `PATCH /students/{id}` merges an updated `attendance` map back into it.
//! Transient upstream errors (429, 500, 503) are retried once.

pub mod store;

pub use store::HttpAttendanceStore;
