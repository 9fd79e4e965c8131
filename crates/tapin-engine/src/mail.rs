// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guardian notification composition.

use chrono::{DateTime, FixedOffset};

use tapin_core::{EmailRequest, GuardianContact, Window};

/// First name of a roster-style `"Last, First"` name. Names without a
/// comma are used as-is.
pub fn first_name(full: &str) -> &str {
    match full.split_once(',') {
        Some((_, first)) => first.trim(),
        None => full.trim(),
    }
}

/// Build the guardian email for one recorded scan.
pub fn compose_email(
    window: Window,
    student_name: &str,
    contact: &GuardianContact,
    now: DateTime<FixedOffset>,
) -> EmailRequest {
    let verb = match window {
        Window::CheckIn => "arrived",
        Window::CheckOut => "left",
    };
    let log_kind = match window {
        Window::CheckIn => "Arrival",
        Window::CheckOut => "Departure",
    };
    let date = now.format("%-m/%-d/%Y");
    let time = now.format("%-I:%M %p");
    EmailRequest {
        title: format!("{} has {verb}", first_name(student_name)),
        student_name: student_name.to_string(),
        email: contact.email.clone(),
        subject: format!("{log_kind} Log - {date}"),
        message: format!("{student_name} has {verb} safely at {time}"),
        token: contact.token.clone(),
    }
}
