//! User-facing notifications emitted by the core.

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NotificationKind {
    #[display("success")]
    Success,
    #[display("error")]
    Error,
    #[display("warning")]
    Warning,
    #[display("info")]
    Info,
}

/// Toast-style message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Milliseconds before the toast hides itself. Errors stay until closed.
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: None,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(5000),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }
}

/// Sink for notifications (the toast container in the browser)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
