//! User-facing notices
//!
//! Recoverable errors and confirmations surface as transient, dismissible
//! notices. Workflows push into the channel; the view layer drains it.

use tokio::sync::mpsc;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half handed to workflows
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

impl NoticeSender {
    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
        };
        // A dropped receiver just means no view is listening anymore.
        let _ = self.tx.send(notice);
    }
}

/// Create a notice channel
pub fn notice_channel() -> (NoticeSender, mpsc::UnboundedReceiver<Notice>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_delivered_in_order() {
        let (sender, mut rx) = notice_channel();
        sender.success("saved");
        sender.error("failed");

        assert_eq!(
            rx.try_recv().unwrap(),
            Notice {
                level: NoticeLevel::Success,
                message: "saved".into()
            }
        );
        assert_eq!(rx.try_recv().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_send_without_receiver_is_silent() {
        let (sender, rx) = notice_channel();
        drop(rx);
        sender.info("nobody listening");
    }
}
