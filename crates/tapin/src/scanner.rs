// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-based frame source.
//!
//! Most USB QR scanners present as a keyboard and emit the decoded symbol
//! followed by a newline, so reading lines from stdin covers the common
//! kiosk hardware without any camera integration. Read errors surface as
//! scanner faults rather than ending the stream.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use tapin_core::{FrameSource, ScanEvent};

/// Frame source that reads one decoded symbol per line from stdin.
pub struct StdinFrameSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinFrameSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for StdinFrameSource {
    async fn next_event(&mut self) -> Option<ScanEvent> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(ScanEvent::Decoded(line));
                }
                Ok(None) => return None,
                Err(err) => return Some(ScanEvent::Fault(err.to_string())),
            }
        }
    }
}
