//! User-facing notifications (the toast seam).
//!
//! The core never draws toasts; it publishes [`Notice`] values onto a hub the
//! rendering layer drains. Producers hold a cheap cloneable [`NoticeSender`];
//! the editor owns the [`NoticeHub`] and forwards drained notices to any
//! registered [`NoticeSink`]s (stdout for CLI hosts, memory for tests).

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Severity of a notice, mirroring the toast variants the UI renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single user-visible notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub when: DateTime<Utc>,
}

impl Notice {
    #[must_use]
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            when: Utc::now(),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }
}

/// Consumer of drained notices.
pub trait NoticeSink: Send + Sync {
    fn publish(&self, notice: &Notice);
}

/// Sink that writes notices to stderr, for headless hosts.
#[derive(Debug, Default)]
pub struct StderrSink;

impl NoticeSink for StderrSink {
    fn publish(&self, notice: &Notice) {
        eprintln!("[{:?}] {}", notice.level, notice.text);
    }
}

/// Sink that retains notices in memory, for tests and replay.
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything published so far.
    #[must_use]
    pub fn collected(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice sink poisoned").clone()
    }
}

impl NoticeSink for MemorySink {
    fn publish(&self, notice: &Notice) {
        self.notices
            .lock()
            .expect("notice sink poisoned")
            .push(notice.clone());
    }
}

/// Cloneable producer handle. Sending never blocks and never fails visibly;
/// a hub that has been dropped simply discards the notice.
#[derive(Clone, Debug)]
pub struct NoticeSender {
    tx: flume::Sender<Notice>,
}

impl NoticeSender {
    pub fn send(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }
}

/// Owner side of the notification channel.
///
/// The hub buffers published notices until [`drain`](Self::drain) is called,
/// which forwards them to every registered sink and returns them for the
/// caller's own rendering. Draining from the owning event loop keeps the
/// single-writer model: sinks run on the editor's schedule, not the
/// producer's.
pub struct NoticeHub {
    tx: flume::Sender<Notice>,
    rx: flume::Receiver<Notice>,
    sinks: Vec<Box<dyn NoticeSink>>,
}

impl Default for NoticeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeHub {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            tx,
            rx,
            sinks: Vec::new(),
        }
    }

    /// Register a sink that receives every drained notice.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn NoticeSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// A producer handle for sessions and clients.
    #[must_use]
    pub fn sender(&self) -> NoticeSender {
        NoticeSender {
            tx: self.tx.clone(),
        }
    }

    /// Forward all pending notices to the sinks and return them.
    pub fn drain(&self) -> Vec<Notice> {
        let mut drained = Vec::new();
        while let Ok(notice) = self.rx.try_recv() {
            for sink in &self.sinks {
                sink.publish(&notice);
            }
            drained.push(notice);
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_pending_in_order() {
        let hub = NoticeHub::new();
        let sender = hub.sender();
        sender.send(Notice::info("first"));
        sender.send(Notice::warning("second"));
        sender.send(Notice::error("third"));

        let drained = hub.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[0].text, "first");
        assert_eq!(drained[1].level, NoticeLevel::Warning);
        assert_eq!(drained[2].level, NoticeLevel::Error);
        assert!(hub.drain().is_empty());
    }

    #[test]
    fn sinks_observe_drained_notices() {
        let sink = std::sync::Arc::new(MemorySink::new());
        struct Shared(std::sync::Arc<MemorySink>);
        impl NoticeSink for Shared {
            fn publish(&self, notice: &Notice) {
                self.0.publish(notice);
            }
        }

        let hub = NoticeHub::new().with_sink(Box::new(Shared(sink.clone())));
        hub.sender().send(Notice::success("saved"));
        hub.drain();
        assert_eq!(sink.collected().len(), 1);
        assert_eq!(sink.collected()[0].text, "saved");
    }

    #[test]
    fn send_after_hub_drop_is_silent() {
        let hub = NoticeHub::new();
        let sender = hub.sender();
        drop(hub);
        sender.send(Notice::info("into the void"));
    }
}
