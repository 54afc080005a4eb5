//! Shopper-facing notices.

use crate::types::NoticeKind;

/// Where messages for the shopper are queued.
pub trait NoticeSurface {
    fn has_notice(&self, text: &str, kind: NoticeKind) -> bool;

    fn add_notice(&mut self, text: &str, kind: NoticeKind);

    /// Queue `text` unless the same notice is already queued.
    fn add_notice_once(&mut self, text: &str, kind: NoticeKind) {
        if !self.has_notice(text, kind) {
            self.add_notice(text, kind);
        }
    }
}

/// Notices queued in memory for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    notices: Vec<(NoticeKind, String)>,
}

impl NoticeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queued notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[(NoticeKind, String)] {
        &self.notices
    }

    /// Take every queued notice, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<(NoticeKind, String)> {
        std::mem::take(&mut self.notices)
    }
}

impl NoticeSurface for NoticeQueue {
    fn has_notice(&self, text: &str, kind: NoticeKind) -> bool {
        self.notices.iter().any(|(k, t)| *k == kind && t == text)
    }

    fn add_notice(&mut self, text: &str, kind: NoticeKind) {
        self.notices.push((kind, text.to_owned()));
    }
}
