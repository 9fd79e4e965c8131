// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded recent-activity log.
//!
//! Append-to-front, truncate-to-capacity. Insertion order reflects the order
//! in which scan outcomes resolve, which may differ from camera-detection
//! order when round-trip latencies differ; the log is a display aid, not an
//! audit trail.

use std::collections::VecDeque;

use tapin_core::ActivityEntry;

/// Newest-first list of processed-scan summaries, capped at a fixed size.
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an entry, silently dropping the oldest past capacity.
    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Snapshot of entries, newest first.
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Invoked by the daily session reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
