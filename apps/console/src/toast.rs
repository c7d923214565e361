//! # Toast Notifier
//!
//! One toast at a time. Showing a new one replaces the old and restarts
//! the dismiss timer instead of queueing behind it.

use std::time::Duration;

use tablepos_core::Severity;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug)]
pub struct Notifier {
    duration: Duration,
    current: Option<(Toast, Instant)>,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Notifier {
            duration,
            current: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let toast = Toast {
            message: message.into(),
            severity,
        };
        self.current = Some((toast, now + self.duration));
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(toast, _)| toast)
    }

    /// When the visible toast should go away.
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|(_, at)| *at)
    }

    /// Hides the toast if its time is up. Returns the dismissed toast.
    pub fn expire(&mut self, now: Instant) -> Option<Toast> {
        match self.deadline() {
            Some(at) if at <= now => self.current.take().map(|(toast, _)| toast),
            _ => None,
        }
    }
}
