// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tapin integration tests.
//!
//! Provides mock adapters and a settable clock for fast, deterministic,
//! CI-runnable tests without a camera, a remote store, or an email relay.
//!
//! # Components
//!
//! - [`MockStore`] - In-memory attendance store with failure injection
//! - [`MockNotifier`] - Notifier that captures sent emails
//! - [`ManualClock`] - Clock pinned to a settable instant
//! - [`ScriptedFrames`] - Frame source that replays a fixed event sequence

pub mod manual_clock;
pub mod mock_notifier;
pub mod mock_store;
pub mod scripted_frames;

pub use manual_clock::ManualClock;
pub use mock_notifier::MockNotifier;
pub use mock_store::MockStore;
pub use scripted_frames::ScriptedFrames;
