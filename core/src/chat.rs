//! Chat output collaborator
//!
//! Announcements are fire-and-forget: the fight never waits on delivery and
//! never learns whether a message was shown.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;

/// Sink for public chat announcements
pub trait ChatOutput: Send + Sync {
    fn announce(&self, text: &str);
}

/// Forwards announcements into a channel drained by the host
#[derive(Debug, Clone)]
pub struct ChannelChat {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelChat {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ChatOutput for ChannelChat {
    fn announce(&self, text: &str) {
        if self.tx.send(text.to_string()).is_err() {
            tracing::debug!(text, "Chat receiver dropped, announcement discarded");
        }
    }
}

/// Keeps every announcement in memory
#[derive(Debug, Default)]
pub struct RecordingChat {
    lines: Mutex<Vec<String>>,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ChatOutput for RecordingChat {
    fn announce(&self, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}
