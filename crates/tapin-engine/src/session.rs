// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-day kiosk session state.

use tapin_core::{ActivityEntry, StudentId};

use crate::activity::ActivityLog;
use crate::dedup::DedupGuard;

/// Mutable state that lives for one school day: which badges have been
/// seen and the recent-activity feed shown to staff. Cleared wholesale by
/// the daily reset.
pub struct ScanSession {
    dedup: DedupGuard,
    activity: ActivityLog,
}

impl ScanSession {
    pub fn new(activity_capacity: usize) -> Self {
        Self {
            dedup: DedupGuard::new(),
            activity: ActivityLog::new(activity_capacity),
        }
    }

    pub fn dedup(&mut self) -> &mut DedupGuard {
        &mut self.dedup
    }

    pub fn record_activity(&mut self, id: StudentId, time: String, student_name: String) {
        self.activity.push(ActivityEntry {
            id,
            time,
            student_name,
        });
    }

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.activity.entries()
    }

    pub fn has_processed(&self, id: &StudentId) -> bool {
        !self.dedup.should_process(id)
    }

    /// Daily reset: forget every processed badge and clear the feed.
    pub fn reset(&mut self) {
        self.dedup.reset();
        self.activity.clear();
    }
}
