//! Unbounded multi-producer queue between job workers and the console.

use std::sync::mpsc;
use std::time::Duration;

use crate::LogMessage;

/// How often the UI drains the queue.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Creates a connected sender/relay pair with the default polling interval.
pub fn log_queue() -> (LogSender, LogRelay) {
    let (tx, rx) = mpsc::channel();
    (
        LogSender { tx },
        LogRelay {
            rx,
            poll_interval: DEFAULT_POLL_INTERVAL,
        },
    )
}

/// Producer half. Cheap to clone and safe to use from any thread.
#[derive(Debug, Clone)]
pub struct LogSender {
    tx: mpsc::Sender<LogMessage>,
}

impl LogSender {
    /// Enqueues without blocking. A message sent after the relay is gone is dropped.
    pub fn send(&self, message: impl Into<LogMessage>) {
        let _ = self.tx.send(message.into());
    }
}

/// Consumer half, owned by the UI thread.
#[derive(Debug)]
pub struct LogRelay {
    rx: mpsc::Receiver<LogMessage>,
    poll_interval: Duration,
}

impl LogRelay {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Takes every message available right now, in arrival order. Never waits.
    pub fn drain(&self) -> Vec<LogMessage> {
        self.rx.try_iter().collect()
    }
}
