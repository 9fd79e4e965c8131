// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frame source trait for camera/decoder integrations.

use async_trait::async_trait;

use crate::types::ScanEvent;

/// Source of decoded QR frames.
///
/// Abstracts over whatever camera/decode library (or serial scanner) the
/// deployment uses: the pipeline consumes [`ScanEvent`]s and never assumes a
/// specific decoder's shape. Hardware/decode errors arrive as
/// [`ScanEvent::Fault`] rather than terminating the stream.
#[async_trait]
pub trait FrameSource: Send {
    /// Wait for the next frame event. `None` means the source is exhausted
    /// and the kiosk should shut down.
    async fn next_event(&mut self) -> Option<ScanEvent>;
}
