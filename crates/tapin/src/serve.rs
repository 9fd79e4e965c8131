// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tapin serve` command implementation.
//!
//! Wires the scan pipeline to the HTTP attendance store, the guardian
//! notification worker, and the stdin frame source, then runs the frame
//! loop until the source is exhausted or a shutdown signal arrives. Each
//! frame is processed on its own task so a slow store round-trip never
//! blocks the next scan.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{info, warn};

use tapin_config::model::TapinConfig;
use tapin_core::{
    Clock, FrameSource, GuardianDirectory, KioskAdapter, KioskError, Notifier, ScanOutcome,
};
use tapin_engine::feedback::{CueColor, FeedbackDispatcher, cue_for};
use tapin_engine::{
    DailyTrigger, ScanPipeline, ScanSession, SystemClock, WindowBounds, spawn_mode_task,
    spawn_reset_task,
};
use tapin_notify::HttpNotifier;
use tapin_store_http::HttpAttendanceStore;

use crate::scanner::StdinFrameSource;
use crate::shutdown;

/// Runs the `tapin serve` command.
pub async fn run_serve(config: TapinConfig) -> Result<(), KioskError> {
    init_tracing(&config.kiosk.log_level);

    info!(kiosk = %config.kiosk.name, "starting tapin serve");

    let clock: Arc<dyn Clock> =
        Arc::new(SystemClock::with_offset_hours(config.kiosk.utc_offset_hours)?);
    let bounds = WindowBounds::from_config(&config.window)?;
    let reset_at = config.reset.at_time().ok_or_else(|| {
        KioskError::Config(format!("reset.at `{}` is not HH:MM", config.reset.at))
    })?;

    let store = Arc::new(HttpAttendanceStore::new(&config.store)?);

    let guardians = match &config.notify.contacts_path {
        Some(path) => tapin_notify::load_contacts(Path::new(path))?,
        None => {
            warn!("notify.contacts_path not set, no guardian will be notified");
            GuardianDirectory::default()
        }
    };

    let (mail_tx, mail_rx) = mpsc::channel(config.notify.queue_size);
    let notify_handle = match &config.notify.endpoint {
        Some(_) => {
            let notifier = Arc::new(HttpNotifier::new(&config.notify)?);
            tapin_notify::spawn_notify_worker(mail_rx, notifier as Arc<dyn Notifier>)
        }
        None => {
            info!("notify.endpoint not set, notifications disabled");
            tokio::spawn(async move {
                let mut rx = mail_rx;
                while rx.recv().await.is_some() {}
            })
        }
    };

    let session = Arc::new(Mutex::new(ScanSession::new(config.kiosk.activity_log_size)));
    let feedback = Arc::new(FeedbackDispatcher::new(
        Duration::from_millis(config.feedback.revert_ms),
        Duration::from_millis(config.feedback.already_scanned_throttle_ms),
    ));

    let pipeline = Arc::new(ScanPipeline::new(
        Arc::clone(&store) as _,
        Arc::clone(&clock),
        bounds,
        config.kiosk.sentinel_prefix.clone(),
        Arc::clone(&session),
        Arc::clone(&feedback),
        mail_tx,
        guardians,
    ));

    let cancel = shutdown::install_signal_handler();

    // Mode banner: print the current window and re-print when it flips.
    let (mode_tx, mut mode_rx) = watch::channel(pipeline.current_window());
    println!("{}", mode_rx.borrow().banner().cyan().bold());
    let mode_handle = spawn_mode_task(
        Arc::clone(&clock),
        bounds,
        Duration::from_secs(config.window.mode_refresh_secs),
        mode_tx,
        cancel.clone(),
    );
    let banner_cancel = cancel.clone();
    let banner_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = banner_cancel.cancelled() => break,
                changed = mode_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    println!("{}", mode_rx.borrow().banner().cyan().bold());
                }
            }
        }
    });

    let reset_handle = spawn_reset_task(
        Arc::clone(&clock),
        Arc::clone(&session),
        DailyTrigger::new(reset_at),
        Duration::from_secs(config.reset.poll_secs),
        cancel.clone(),
    );

    // Frame loop. Each event gets its own task; the pipeline's session lock
    // serializes the parts that must not race.
    let mut source = StdinFrameSource::new();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = source.next_event() => match event {
                Some(event) => {
                    let pipeline = Arc::clone(&pipeline);
                    tokio::spawn(async move {
                        let outcome = pipeline.handle_event(event).await;
                        print_outcome(&outcome);
                    });
                }
                None => {
                    info!("frame source exhausted");
                    break;
                }
            }
        }
    }

    cancel.cancel();
    drop(pipeline);

    // The worker exits once every in-flight frame task has dropped its
    // channel sender.
    let _ = notify_handle.await;
    let _ = mode_handle.await;
    let _ = banner_handle.await;
    let _ = reset_handle.await;
    store.shutdown().await?;

    info!("tapin stopped");
    Ok(())
}

/// Print one outcome line, colored by its feedback cue.
fn print_outcome(outcome: &ScanOutcome) {
    let text = match outcome {
        ScanOutcome::CheckedIn { name, .. } => format!("✓ {name} checked in"),
        ScanOutcome::CheckedOut { name, .. } => format!("✓ {name} checked out"),
        ScanOutcome::AlreadyRecorded { name, .. } => {
            format!("already recorded today: {name}")
        }
        ScanOutcome::AlreadyScanned { id, throttled } => {
            if *throttled {
                return;
            }
            format!("already scanned: {id}")
        }
        ScanOutcome::InvalidCode => "not a kiosk badge".to_string(),
        ScanOutcome::UnknownStudent { id } => format!("unknown student: {id}"),
        ScanOutcome::StoreFailure { id } => format!("store error, try again later: {id}"),
        ScanOutcome::ScannerFault => "scanner fault".to_string(),
    };
    let line = match cue_for(outcome).color {
        CueColor::Success => text.green(),
        CueColor::Info => text.blue(),
        CueColor::Warning => text.yellow(),
        CueColor::Error => text.red(),
        CueColor::Neutral => text.normal(),
    };
    println!("{line}");
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tapin={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
