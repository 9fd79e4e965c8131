// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for Tapin's external collaborators.

pub mod adapter;
pub mod clock;
pub mod notify;
pub mod scanner;
pub mod store;

pub use adapter::KioskAdapter;
pub use clock::Clock;
pub use notify::Notifier;
pub use scanner::FrameSource;
pub use store::AttendanceStore;
