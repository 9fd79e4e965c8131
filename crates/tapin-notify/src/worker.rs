// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget notify worker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tapin_core::{EmailRequest, Notifier};

/// Spawn the notify worker: drains the email channel and delivers each
/// request through the notifier. Delivery failures are logged and dropped.
///
/// The worker exits when every channel sender is gone, which doubles as
/// its shutdown path.
pub fn spawn_notify_worker(
    mut rx: mpsc::Receiver<EmailRequest>,
    notifier: Arc<dyn Notifier>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            match notifier.send(&request).await {
                Ok(()) => {
                    info!(student = %request.student_name, subject = %request.subject, "notification sent");
                }
                Err(err) => {
                    warn!(student = %request.student_name, error = %err, "notification failed, dropping");
                }
            }
        }
        debug!("notify worker stopping");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tapin_test_utils::MockNotifier;

    fn request(name: &str) -> EmailRequest {
        EmailRequest {
            title: format!("{name} has arrived"),
            student_name: name.to_string(),
            email: "guardian@example.com".into(),
            subject: "Arrival Log - 6/3/2024".into(),
            message: format!("{name} has arrived safely at 7:30 AM"),
            token: "tok".into(),
        }
    }

    #[tokio::test]
    async fn delivers_queued_requests_in_order() {
        let (tx, rx) = mpsc::channel(8);
        let notifier = Arc::new(MockNotifier::new());
        let handle = spawn_notify_worker(rx, Arc::clone(&notifier) as Arc<dyn Notifier>);

        tx.send(request("Ana")).await.unwrap();
        tx.send(request("Ben")).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].student_name, "Ana");
        assert_eq!(sent[1].student_name, "Ben");
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_worker() {
        let (tx, rx) = mpsc::channel(8);
        let notifier = Arc::new(MockNotifier::new());
        let handle = spawn_notify_worker(rx, Arc::clone(&notifier) as Arc<dyn Notifier>);

        notifier.fail_send(true);
        tx.send(request("Ana")).await.unwrap();
        while notifier.attempts() < 1 {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        notifier.fail_send(false);
        tx.send(request("Ben")).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].student_name, "Ben");
    }
}
