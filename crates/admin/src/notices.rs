//! Transient user-facing notices.
//!
//! Every console operation reports its outcome as a [`Notice`]: one success
//! or one failure per network call. Screens decide how to show them; the CLI
//! prints them after each command, tests inspect them.

use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A single transient message for the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}

/// Destination for notices.
pub trait NoticeSink: Send + Sync {
    fn push(&self, notice: Notice);
}

/// Sink that only logs notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn push(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
        }
    }
}

/// Sink that logs and keeps notices until drained.
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    entries: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notice recorded so far, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of the notices recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoticeSink for NoticeLog {
    fn push(&self, notice: Notice) {
        TracingNotices.push(notice.clone());
        self.lock().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_log_drain() {
        let log = NoticeLog::new();
        log.push(Notice::success("Saved"));
        log.push(Notice::error("Server Error"));

        assert_eq!(log.snapshot().len(), 2);
        let drained = log.drain();
        assert_eq!(
            drained,
            vec![Notice::success("Saved"), Notice::error("Server Error")]
        );
        assert!(drained[1].is_error());
        assert!(log.drain().is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let log = NoticeLog::new();
        let handle = log.clone();
        handle.push(Notice::success("Reply successfully"));
        assert_eq!(log.snapshot(), vec![Notice::success("Reply successfully")]);
    }
}
