// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-scoped scan de-duplication.
//!
//! A badge sits in the camera's field of view across many frames, and the
//! remote round-trip for one frame can still be outstanding when the next
//! frame decodes the same symbol. The guard therefore tracks two sets:
//! identifiers whose processing has resolved this session, and identifiers
//! whose round-trip is currently in flight. The in-flight marker is the
//! mutual-exclusion mechanism for repeats of the same identifier and must be
//! set synchronously before the remote read is issued.

use std::collections::HashSet;

use tapin_core::StudentId;

/// In-memory de-duplication guard for one kiosk session.
#[derive(Debug, Default)]
pub struct DedupGuard {
    done: HashSet<StudentId>,
    in_flight: HashSet<StudentId>,
}

impl DedupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the identifier is in neither the processed set nor the
    /// in-flight set.
    pub fn should_process(&self, id: &StudentId) -> bool {
        !self.done.contains(id) && !self.in_flight.contains(id)
    }

    /// Mark an identifier's round-trip as outstanding. Called before the
    /// remote read begins.
    pub fn mark_in_flight(&mut self, id: StudentId) {
        self.in_flight.insert(id);
    }

    /// Move an identifier from in-flight to processed. Called once the
    /// round-trip resolves, on success or definitive failure alike, so a
    /// resolved badge is never reprocessed this session.
    pub fn mark_done(&mut self, id: StudentId) {
        self.in_flight.remove(&id);
        self.done.insert(id);
    }

    /// Clear both sets. Invoked by the daily session reset.
    pub fn reset(&mut self) {
        self.done.clear();
        self.in_flight.clear();
    }

    /// Number of identifiers processed this session.
    pub fn processed_count(&self) -> usize {
        self.done.len()
    }

    /// Number of identifiers with an outstanding round-trip.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StudentId {
        StudentId(s.to_string())
    }

    #[test]
    fn fresh_identifier_is_processable() {
        let guard = DedupGuard::new();
        assert!(guard.should_process(&id("S1")));
    }

    #[test]
    fn in_flight_identifier_is_rejected() {
        let mut guard = DedupGuard::new();
        guard.mark_in_flight(id("S1"));
        assert!(!guard.should_process(&id("S1")));
        assert!(guard.should_process(&id("S2")));
    }

    #[test]
    fn mark_done_moves_out_of_in_flight() {
        let mut guard = DedupGuard::new();
        guard.mark_in_flight(id("S1"));
        guard.mark_done(id("S1"));
        assert_eq!(guard.in_flight_count(), 0);
        assert_eq!(guard.processed_count(), 1);
        assert!(!guard.should_process(&id("S1")));
    }

    #[test]
    fn reset_makes_identifiers_eligible_again() {
        let mut guard = DedupGuard::new();
        guard.mark_in_flight(id("S1"));
        guard.mark_done(id("S1"));
        guard.mark_in_flight(id("S2"));
        guard.reset();
        assert!(guard.should_process(&id("S1")));
        assert!(guard.should_process(&id("S2")));
        assert_eq!(guard.processed_count(), 0);
        assert_eq!(guard.in_flight_count(), 0);
    }
}
