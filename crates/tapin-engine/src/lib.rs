// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attendance kiosk engine: the scan pipeline and the session machinery
//! around it.
//!
//! The engine is adapter-agnostic. It consumes decoded frames through
//! [`tapin_core::FrameSource`], talks to whatever
//! [`tapin_core::AttendanceStore`] and [`tapin_core::Notifier`] the binary
//! wires in, and publishes kiosk surface state (feedback cues, mode banner,
//! activity feed) through channels.

pub mod activity;
pub mod clock;
pub mod dedup;
pub mod feedback;
pub mod mail;
pub mod pipeline;
pub mod reset;
pub mod session;
pub mod window;

pub use clock::{Clock, SystemClock};
pub use feedback::{Cue, CueColor, CueSound, FeedbackDispatcher, FeedbackState, cue_for};
pub use pipeline::ScanPipeline;
pub use reset::{DailyTrigger, spawn_mode_task, spawn_reset_task};
pub use session::ScanSession;
pub use window::WindowBounds;
