// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome-to-cue mapping and transient feedback dispatch.
//!
//! Staff must be able to tell "broken badge" from "already tapped" at a
//! glance, so error and already-scanned cues are deliberately distinct. A cue
//! stays active for a fixed duration and then reverts to neutral; the revert
//! is a fire-and-forget timer and never blocks the scan pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

use tapin_core::ScanOutcome;

/// Visual state of the kiosk surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueColor {
    /// Idle background.
    Neutral,
    /// A check-in or check-out was written.
    Success,
    /// Legitimate idempotent no-op (slot already filled today).
    Info,
    /// Badge already processed this session.
    Warning,
    /// Invalid badge, unknown student, or store failure.
    Error,
}

/// Audio cue accompanying a visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueSound {
    Success,
    AlreadyScanned,
    Error,
}

/// One transient feedback pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub color: CueColor,
    pub sound: Option<CueSound>,
}

impl Cue {
    pub const NEUTRAL: Cue = Cue {
        color: CueColor::Neutral,
        sound: None,
    };
}

/// Map a scan outcome to its feedback cue.
pub fn cue_for(outcome: &ScanOutcome) -> Cue {
    match outcome {
        ScanOutcome::CheckedIn { .. } | ScanOutcome::CheckedOut { .. } => Cue {
            color: CueColor::Success,
            sound: Some(CueSound::Success),
        },
        ScanOutcome::AlreadyRecorded { .. } => Cue {
            color: CueColor::Info,
            sound: None,
        },
        ScanOutcome::AlreadyScanned { .. } => Cue {
            color: CueColor::Warning,
            sound: Some(CueSound::AlreadyScanned),
        },
        ScanOutcome::InvalidCode
        | ScanOutcome::UnknownStudent { .. }
        | ScanOutcome::StoreFailure { .. }
        | ScanOutcome::ScannerFault => Cue {
            color: CueColor::Error,
            sound: Some(CueSound::Error),
        },
    }
}

/// Feedback state published to the kiosk surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackState {
    /// Monotonic pulse counter; lets the revert timer detect that a newer
    /// cue has replaced the one it was scheduled for.
    pub seq: u64,
    pub cue: Cue,
}

/// Dispatches transient cues over a watch channel.
pub struct FeedbackDispatcher {
    tx: watch::Sender<FeedbackState>,
    seq: AtomicU64,
    revert_after: Duration,
    already_scanned_throttle: Duration,
    last_already_scanned: Mutex<Option<Instant>>,
}

impl FeedbackDispatcher {
    pub fn new(revert_after: Duration, already_scanned_throttle: Duration) -> Self {
        let (tx, _) = watch::channel(FeedbackState {
            seq: 0,
            cue: Cue::NEUTRAL,
        });
        Self {
            tx,
            seq: AtomicU64::new(0),
            revert_after,
            already_scanned_throttle,
            last_already_scanned: Mutex::new(None),
        }
    }

    /// Subscribe to feedback state changes.
    pub fn subscribe(&self) -> watch::Receiver<FeedbackState> {
        self.tx.subscribe()
    }

    /// Publish a cue and schedule its revert to neutral.
    ///
    /// The revert is a spawned timer; if another cue lands before it fires,
    /// the revert is abandoned in favor of the newer cue's own timer.
    pub fn signal(&self, cue: Cue) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        self.tx.send_replace(FeedbackState { seq, cue });

        let tx = self.tx.clone();
        let revert_after = self.revert_after;
        tokio::spawn(async move {
            tokio::time::sleep(revert_after).await;
            tx.send_if_modified(|state| {
                if state.seq == seq && state.cue != Cue::NEUTRAL {
                    state.cue = Cue::NEUTRAL;
                    true
                } else {
                    false
                }
            });
        });
    }

    /// Publish the already-scanned cue, rate-limited to one pulse per
    /// throttle interval regardless of which badge triggered it.
    ///
    /// Returns false when the pulse was suppressed by the throttle.
    pub fn signal_already_scanned(&self, cue: Cue) -> bool {
        let mut last = self
            .last_already_scanned
            .lock()
            .expect("already-scanned throttle lock poisoned");
        let now = Instant::now();
        if let Some(previous) = *last {
            if now.duration_since(previous) < self.already_scanned_throttle {
                debug!("already-scanned cue suppressed by throttle");
                return false;
            }
        }
        *last = Some(now);
        drop(last);
        self.signal(cue);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapin_core::StudentId;

    fn dispatcher(revert_ms: u64, throttle_ms: u64) -> FeedbackDispatcher {
        FeedbackDispatcher::new(
            Duration::from_millis(revert_ms),
            Duration::from_millis(throttle_ms),
        )
    }

    #[test]
    fn outcome_cues_are_distinct() {
        let written = cue_for(&ScanOutcome::CheckedIn {
            id: StudentId("S1".into()),
            name: "A".into(),
        });
        let already = cue_for(&ScanOutcome::AlreadyScanned {
            id: StudentId("S1".into()),
            throttled: false,
        });
        let error = cue_for(&ScanOutcome::InvalidCode);
        assert_eq!(written.color, CueColor::Success);
        assert_eq!(already.color, CueColor::Warning);
        assert_eq!(error.color, CueColor::Error);
        assert_ne!(already.sound, error.sound);
    }

    #[test]
    fn already_recorded_is_informational() {
        let cue = cue_for(&ScanOutcome::AlreadyRecorded {
            id: StudentId("S1".into()),
            name: "A".into(),
        });
        assert_eq!(cue.color, CueColor::Info);
        assert!(cue.sound.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cue_reverts_to_neutral_after_timeout() {
        let dispatcher = dispatcher(1000, 1500);
        let rx = dispatcher.subscribe();

        dispatcher.signal(cue_for(&ScanOutcome::InvalidCode));
        assert_eq!(rx.borrow().cue.color, CueColor::Error);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.borrow().cue, Cue::NEUTRAL);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_cue_outlives_older_revert() {
        let dispatcher = dispatcher(1000, 1500);
        let rx = dispatcher.subscribe();

        dispatcher.signal(cue_for(&ScanOutcome::InvalidCode));
        tokio::time::sleep(Duration::from_millis(500)).await;
        dispatcher.signal(cue_for(&ScanOutcome::CheckedIn {
            id: StudentId("S1".into()),
            name: "A".into(),
        }));

        // The first cue's revert timer fires here; it must not clear the
        // second cue.
        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.borrow().cue.color, CueColor::Success);

        tokio::time::sleep(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.borrow().cue, Cue::NEUTRAL);
    }

    #[tokio::test(start_paused = true)]
    async fn already_scanned_pulses_are_throttled() {
        let dispatcher = dispatcher(1000, 1500);
        let cue = cue_for(&ScanOutcome::AlreadyScanned {
            id: StudentId("S1".into()),
            throttled: false,
        });

        assert!(dispatcher.signal_already_scanned(cue));
        assert!(!dispatcher.signal_already_scanned(cue));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(dispatcher.signal_already_scanned(cue));
    }
}
