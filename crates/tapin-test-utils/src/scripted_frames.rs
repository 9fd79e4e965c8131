// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frame source that replays a fixed event sequence.

use std::collections::VecDeque;

use async_trait::async_trait;

use tapin_core::{FrameSource, ScanEvent};

/// A frame source for testing: yields the scripted events in order, then
/// reports exhaustion.
pub struct ScriptedFrames {
    events: VecDeque<ScanEvent>,
}

impl ScriptedFrames {
    pub fn new(events: impl IntoIterator<Item = ScanEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Convenience constructor for a sequence of decoded payloads.
    pub fn decoded(payloads: impl IntoIterator<Item = String>) -> Self {
        Self::new(payloads.into_iter().map(ScanEvent::Decoded))
    }
}

#[async_trait]
impl FrameSource for ScriptedFrames {
    async fn next_event(&mut self) -> Option<ScanEvent> {
        self.events.pop_front()
    }
}
