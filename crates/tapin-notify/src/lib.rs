// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guardian notification: relay adapter, contacts file, and the
//! fire-and-forget worker.
//!
//! The scan pipeline never awaits an email. Requests travel over a bounded
//! channel to [`spawn_notify_worker`], which delivers them through whatever
//! [`tapin_core::Notifier`] is wired in. Failures are logged and dropped;
//! attendance is already recorded by the time a request reaches this crate.

pub mod contacts;
pub mod relay;
pub mod worker;

pub use contacts::load_contacts;
pub use relay::HttpNotifier;
pub use worker::spawn_notify_worker;
