// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scan pipeline: raw QR text in, attendance side effects out.
//!
//! Per frame: decode and validate the badge payload, gate on the session
//! de-duplication sets, classify the wall-clock window, read-modify-write
//! the remote attendance document, then fan out to the activity log, the
//! feedback dispatcher, and the notification channel. The de-duplication
//! gate is taken synchronously under the session lock before the remote
//! read starts, so concurrent frames carrying the same badge cannot both
//! reach the store.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};

use tapin_core::codec;
use tapin_core::{
    AttendanceStore, Clock, EmailRequest, GuardianDirectory, ScanEvent, ScanOutcome, StudentId,
    Window,
};

use crate::clock::{date_key, log_time, timestamp};
use crate::feedback::{FeedbackDispatcher, cue_for};
use crate::session::ScanSession;
use crate::window::WindowBounds;

/// Scan pipeline wiring, shared by every in-flight frame task.
pub struct ScanPipeline {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
    bounds: WindowBounds,
    sentinel_prefix: String,
    session: Arc<Mutex<ScanSession>>,
    feedback: Arc<FeedbackDispatcher>,
    mail_tx: mpsc::Sender<EmailRequest>,
    guardians: GuardianDirectory,
}

impl ScanPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        clock: Arc<dyn Clock>,
        bounds: WindowBounds,
        sentinel_prefix: String,
        session: Arc<Mutex<ScanSession>>,
        feedback: Arc<FeedbackDispatcher>,
        mail_tx: mpsc::Sender<EmailRequest>,
        guardians: GuardianDirectory,
    ) -> Self {
        Self {
            store,
            clock,
            bounds,
            sentinel_prefix,
            session,
            feedback,
            mail_tx,
            guardians,
        }
    }

    /// Shared session handle, for the daily reset task and UI snapshots.
    pub fn session(&self) -> Arc<Mutex<ScanSession>> {
        Arc::clone(&self.session)
    }

    /// Current window for the kiosk's local time. Recomputed on every call.
    pub fn current_window(&self) -> Window {
        self.bounds.classify(self.clock.now().time())
    }

    /// Process one frame-source event end to end.
    pub async fn handle_event(&self, event: ScanEvent) -> ScanOutcome {
        match event {
            ScanEvent::Decoded(raw) => self.handle_frame(&raw).await,
            ScanEvent::Fault(message) => {
                warn!(%message, "scanner fault");
                self.feedback.signal(cue_for(&ScanOutcome::ScannerFault));
                ScanOutcome::ScannerFault
            }
        }
    }

    /// Process one decoded QR payload end to end.
    pub async fn handle_frame(&self, raw: &str) -> ScanOutcome {
        let Some(id) = codec::student_id(raw, &self.sentinel_prefix) else {
            debug!(len = raw.len(), "frame is not a kiosk badge");
            let outcome = ScanOutcome::InvalidCode;
            self.feedback.signal(cue_for(&outcome));
            return outcome;
        };

        // De-duplication gate. The in-flight marker is set before the lock
        // is released so a concurrent frame with the same badge short-circuits
        // here instead of racing us to the store.
        {
            let mut session = self.session.lock().await;
            if !session.dedup().should_process(&id) {
                let outcome = ScanOutcome::AlreadyScanned {
                    id: id.clone(),
                    throttled: false,
                };
                let signalled = self.feedback.signal_already_scanned(cue_for(&outcome));
                debug!(student = %id, signalled, "badge already processed this session");
                return ScanOutcome::AlreadyScanned {
                    id,
                    throttled: !signalled,
                };
            }
            session.dedup().mark_in_flight(id.clone());
        }

        let now = self.clock.now();
        let window = self.bounds.classify(now.time());
        let outcome = self.resolve(&id, window, &now).await;

        // Every resolved round-trip retires the badge for the rest of the
        // session, including store failures and unknown identifiers.
        {
            let mut session = self.session.lock().await;
            session.dedup().mark_done(id.clone());
            match &outcome {
                ScanOutcome::CheckedIn { name, .. }
                | ScanOutcome::CheckedOut { name, .. }
                | ScanOutcome::AlreadyRecorded { name, .. } => {
                    session.record_activity(id.clone(), log_time(&now), name.clone());
                }
                _ => {}
            }
        }

        self.feedback.signal(cue_for(&outcome));

        if let ScanOutcome::CheckedIn { name, .. } | ScanOutcome::CheckedOut { name, .. } =
            &outcome
        {
            self.queue_notification(&id, window, name, &now);
        }

        outcome
    }

    /// Read-modify-write one attendance document per the slot rules:
    /// the window's slot is written iff it is still null, and a check-out
    /// for a student with no entry today creates one with a null check-in.
    async fn resolve(
        &self,
        id: &StudentId,
        window: Window,
        now: &chrono::DateTime<chrono::FixedOffset>,
    ) -> ScanOutcome {
        let record = match self.store.fetch(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(student = %id, "no attendance document for badge");
                return ScanOutcome::UnknownStudent { id: id.clone() };
            }
            Err(err) => {
                error!(student = %id, error = %err, "attendance fetch failed");
                return ScanOutcome::StoreFailure { id: id.clone() };
            }
        };

        let name = record.display_name().to_string();
        let mut attendance = record.attendance;
        let entry = attendance.entry(date_key(now)).or_default();

        let slot = match window {
            Window::CheckIn => &mut entry.check_in,
            Window::CheckOut => &mut entry.check_out,
        };
        if slot.is_some() {
            info!(student = %id, %window, "slot already recorded today");
            return ScanOutcome::AlreadyRecorded {
                id: id.clone(),
                name,
            };
        }
        *slot = Some(timestamp(now));

        if let Err(err) = self.store.merge(id, &attendance).await {
            error!(student = %id, error = %err, "attendance merge failed");
            return ScanOutcome::StoreFailure { id: id.clone() };
        }

        info!(student = %id, %window, "attendance recorded");
        match window {
            Window::CheckIn => ScanOutcome::CheckedIn {
                id: id.clone(),
                name,
            },
            Window::CheckOut => ScanOutcome::CheckedOut {
                id: id.clone(),
                name,
            },
        }
    }

    /// Hand the guardian email to the notify worker without waiting on it.
    /// A missing contact or a full queue drops the notification; attendance
    /// is already recorded either way.
    fn queue_notification(
        &self,
        id: &StudentId,
        window: Window,
        name: &str,
        now: &chrono::DateTime<chrono::FixedOffset>,
    ) {
        let Some(contact) = self.guardians.get(id) else {
            debug!(student = %id, "no guardian contact on file");
            return;
        };
        let request = crate::mail::compose_email(window, name, contact, *now);
        if let Err(err) = self.mail_tx.try_send(request) {
            warn!(student = %id, error = %err, "notification queue full, dropping email");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::{DateTime, FixedOffset, TimeZone};

    use tapin_core::{AttendanceRecord, DayEntry};
    use tapin_test_utils::{ManualClock, MockStore};

    fn manila(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 3, h, m, 0)
            .unwrap()
    }

    struct Harness {
        pipeline: ScanPipeline,
        store: Arc<MockStore>,
        clock: Arc<ManualClock>,
        mail_rx: mpsc::Receiver<EmailRequest>,
    }

    fn harness(guardians: GuardianDirectory) -> Harness {
        let store = Arc::new(MockStore::new());
        let clock = Arc::new(ManualClock::new(manila(7, 30)));
        let session = Arc::new(Mutex::new(ScanSession::new(10)));
        let feedback = Arc::new(FeedbackDispatcher::new(
            Duration::from_millis(1000),
            Duration::from_millis(1500),
        ));
        let (mail_tx, mail_rx) = mpsc::channel(8);
        let bounds = WindowBounds::new(
            chrono::NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap();
        let pipeline = ScanPipeline::new(
            Arc::clone(&store) as Arc<dyn AttendanceStore>,
            Arc::clone(&clock) as Arc<dyn Clock>,
            bounds,
            "mvba_".to_string(),
            session,
            feedback,
            mail_tx,
            guardians,
        );
        Harness {
            pipeline,
            store,
            clock,
            mail_rx,
        }
    }

    fn student(name: &str) -> AttendanceRecord {
        AttendanceRecord {
            name: Some(name.to_string()),
            attendance: Default::default(),
        }
    }

    // "S001" encoded with the badge cipher, prefixed.
    fn badge(id: &str) -> String {
        codec::badge_payload(&StudentId(id.to_string()), "mvba_")
    }

    #[tokio::test]
    async fn morning_scan_checks_in() {
        let mut contacts = std::collections::BTreeMap::new();
        contacts.insert(
            "S001".to_string(),
            tapin_core::GuardianContact {
                email: "g@example.com".into(),
                token: "tok".into(),
            },
        );
        let mut h = harness(GuardianDirectory::new(contacts));
        h.store.insert("S001", student("Cruz, Ana"));

        let outcome = h.pipeline.handle_frame(&badge("S001")).await;
        assert_eq!(
            outcome,
            ScanOutcome::CheckedIn {
                id: StudentId("S001".into()),
                name: "Cruz, Ana".into()
            }
        );

        let record = h.store.record("S001").unwrap();
        let entry = record.attendance.get("2024-06-03").unwrap();
        assert_eq!(entry.check_in.as_deref(), Some("2024-06-03T07:30:00"));
        assert_eq!(entry.check_out, None);

        let email = h.mail_rx.try_recv().unwrap();
        assert_eq!(email.title, "Ana has arrived");
        assert_eq!(email.email, "g@example.com");
    }

    #[tokio::test]
    async fn afternoon_scan_creates_entry_with_null_check_in() {
        let h = harness(GuardianDirectory::default());
        h.store.insert("S001", student("Cruz, Ana"));
        h.clock.set(manila(15, 45));

        let outcome = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(outcome, ScanOutcome::CheckedOut { .. }));

        let record = h.store.record("S001").unwrap();
        let entry = record.attendance.get("2024-06-03").unwrap();
        assert_eq!(entry.check_in, None);
        assert_eq!(entry.check_out.as_deref(), Some("2024-06-03T15:45:00"));
    }

    #[tokio::test]
    async fn filled_slot_is_not_overwritten() {
        let mut h = harness(GuardianDirectory::default());
        let mut record = student("Cruz, Ana");
        record.attendance.insert(
            "2024-06-03".to_string(),
            DayEntry {
                check_in: Some("2024-06-03T07:00:00".to_string()),
                check_out: None,
            },
        );
        h.store.insert("S001", record);

        let outcome = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(outcome, ScanOutcome::AlreadyRecorded { .. }));
        assert!(h.store.merges().is_empty());
        assert!(h.mail_rx.try_recv().is_err());

        // The no-op still shows up in the activity feed.
        let session = h.pipeline.session();
        assert_eq!(session.lock().await.activity().len(), 1);
    }

    #[tokio::test]
    async fn repeat_scan_short_circuits() {
        let mut h = harness(GuardianDirectory::default());
        h.store.insert("S001", student("Cruz, Ana"));

        let first = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(first, ScanOutcome::CheckedIn { .. }));
        let second = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(second, ScanOutcome::AlreadyScanned { .. }));
        assert_eq!(h.store.merges().len(), 1);
        assert!(h.mail_rx.try_recv().is_ok());
        assert!(h.mail_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_frames_of_one_badge_write_once() {
        let h = harness(GuardianDirectory::default());
        h.store.insert("S001", student("Cruz, Ana"));
        h.store.set_fetch_delay(Duration::from_millis(50));

        let pipeline = Arc::new(h.pipeline);
        let a = tokio::spawn({
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.handle_frame(&badge("S001")).await }
        });
        let b = tokio::spawn({
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.handle_frame(&badge("S001")).await }
        });
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        let written = [&a, &b]
            .iter()
            .filter(|o| matches!(o, ScanOutcome::CheckedIn { .. }))
            .count();
        let suppressed = [&a, &b]
            .iter()
            .filter(|o| matches!(o, ScanOutcome::AlreadyScanned { .. }))
            .count();
        assert_eq!(written, 1);
        assert_eq!(suppressed, 1);
        assert_eq!(h.store.merges().len(), 1);
    }

    #[tokio::test]
    async fn unknown_student_is_retired_without_activity() {
        let h = harness(GuardianDirectory::default());

        let outcome = h.pipeline.handle_frame(&badge("NOPE")).await;
        assert_eq!(
            outcome,
            ScanOutcome::UnknownStudent {
                id: StudentId("NOPE".into())
            }
        );

        let session = h.pipeline.session();
        {
            let session = session.lock().await;
            assert!(session.activity().is_empty());
            assert!(session.has_processed(&StudentId("NOPE".into())));
        }

        // Subsequent frames with the same badge no longer hit the store.
        let outcome = h.pipeline.handle_frame(&badge("NOPE")).await;
        assert!(matches!(outcome, ScanOutcome::AlreadyScanned { .. }));
        assert_eq!(h.store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_retires_the_badge() {
        let h = harness(GuardianDirectory::default());
        h.store.insert("S001", student("Cruz, Ana"));
        h.store.fail_fetch(true);

        let outcome = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(outcome, ScanOutcome::StoreFailure { .. }));

        h.store.fail_fetch(false);
        let outcome = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(outcome, ScanOutcome::AlreadyScanned { .. }));
    }

    #[tokio::test]
    async fn merge_failure_is_a_store_failure() {
        let h = harness(GuardianDirectory::default());
        h.store.insert("S001", student("Cruz, Ana"));
        h.store.fail_merge(true);

        let outcome = h.pipeline.handle_frame(&badge("S001")).await;
        assert!(matches!(outcome, ScanOutcome::StoreFailure { .. }));
        assert_eq!(h.store.record("S001").unwrap().attendance.len(), 0);
    }

    #[tokio::test]
    async fn garbage_payload_is_invalid() {
        let h = harness(GuardianDirectory::default());
        let outcome = h.pipeline.handle_frame("https://example.com/menu").await;
        assert_eq!(outcome, ScanOutcome::InvalidCode);
        assert_eq!(h.store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn scanner_fault_signals_error() {
        let h = harness(GuardianDirectory::default());
        let outcome = h
            .pipeline
            .handle_event(ScanEvent::Fault("camera disconnected".into()))
            .await;
        assert_eq!(outcome, ScanOutcome::ScannerFault);
    }
}
