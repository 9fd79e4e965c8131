// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily session reset and periodic mode refresh.
//!
//! Both tasks poll the wall clock rather than sleeping until a computed
//! deadline: the kiosk host may suspend or have its clock adjusted, and a
//! poll loop self-corrects where a long absolute sleep would not.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use tapin_core::{Clock, Window};

use crate::session::ScanSession;
use crate::window::WindowBounds;

/// Fires once per day when the local wall clock reaches the configured
/// reset minute.
///
/// Matching is on hour and minute equality, so the poll interval must not
/// exceed one minute or the trigger can be skipped entirely. A date guard
/// keeps multiple polls inside the same minute from firing twice.
#[derive(Debug)]
pub struct DailyTrigger {
    at: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl DailyTrigger {
    pub fn new(at: NaiveTime) -> Self {
        Self {
            at,
            last_fired: None,
        }
    }

    /// True iff the trigger fires for this instant.
    pub fn poll(&mut self, now: DateTime<FixedOffset>) -> bool {
        if now.hour() != self.at.hour() || now.minute() != self.at.minute() {
            return false;
        }
        let today = now.date_naive();
        if self.last_fired == Some(today) {
            return false;
        }
        self.last_fired = Some(today);
        true
    }
}

/// Spawn the daily reset task: polls the clock and wipes the session when
/// the trigger fires.
pub fn spawn_reset_task(
    clock: Arc<dyn Clock>,
    session: Arc<Mutex<ScanSession>>,
    mut trigger: DailyTrigger,
    poll_interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("reset task stopping");
                    break;
                }
                _ = tokio::time::sleep(poll_interval) => {
                    let now = clock.now();
                    if trigger.poll(now) {
                        session.lock().await.reset();
                        info!(date = %now.date_naive(), "daily session reset");
                    }
                }
            }
        }
    })
}

/// Spawn the mode refresh task: re-classifies the current window on an
/// interval and publishes changes over a watch channel.
pub fn spawn_mode_task(
    clock: Arc<dyn Clock>,
    bounds: WindowBounds,
    refresh_interval: Duration,
    tx: watch::Sender<Window>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("mode task stopping");
                    break;
                }
                _ = tokio::time::sleep(refresh_interval) => {
                    let window = bounds.classify(clock.now().time());
                    tx.send_if_modified(|current| {
                        if *current != window {
                            info!(%window, "mode changed");
                            *current = window;
                            true
                        } else {
                            false
                        }
                    });
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use tapin_core::StudentId;
    use tapin_test_utils::ManualClock;

    fn manila(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, day, h, m, 0)
            .unwrap()
    }

    #[test]
    fn fires_only_in_the_reset_minute() {
        let at = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        let mut trigger = DailyTrigger::new(at);
        assert!(!trigger.poll(manila(3, 15, 59)));
        assert!(trigger.poll(manila(3, 16, 0)));
    }

    #[test]
    fn fires_at_most_once_per_day() {
        let at = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        let mut trigger = DailyTrigger::new(at);
        assert!(trigger.poll(manila(3, 16, 0)));
        // Another poll lands in the same minute.
        assert!(!trigger.poll(manila(3, 16, 0)));
        assert!(!trigger.poll(manila(3, 16, 0)));
        // Next day it fires again.
        assert!(trigger.poll(manila(4, 16, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_task_wipes_the_session() {
        let clock = Arc::new(ManualClock::new(manila(3, 16, 0)));
        let session = Arc::new(Mutex::new(ScanSession::new(10)));
        {
            let mut session = session.lock().await;
            let id = StudentId("S1".into());
            session.dedup().mark_in_flight(id.clone());
            session.dedup().mark_done(id);
        }

        let cancel = CancellationToken::new();
        let handle = spawn_reset_task(
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::clone(&session),
            DailyTrigger::new(NaiveTime::from_hms_opt(16, 0, 0).unwrap()),
            Duration::from_secs(60),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(!session.lock().await.has_processed(&StudentId("S1".into())));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn mode_task_publishes_changes() {
        let clock = Arc::new(ManualClock::new(manila(3, 9, 59)));
        let bounds = WindowBounds::new(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap();
        let (tx, rx) = watch::channel(Window::CheckIn);

        let cancel = CancellationToken::new();
        let handle = spawn_mode_task(
            Arc::clone(&clock) as Arc<dyn Clock>,
            bounds,
            Duration::from_secs(60),
            tx,
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(*rx.borrow(), Window::CheckIn);

        clock.set(manila(3, 10, 1));
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(*rx.borrow(), Window::CheckOut);

        cancel.cancel();
        handle.await.unwrap();
    }
}
