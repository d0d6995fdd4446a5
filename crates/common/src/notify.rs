//! User-facing notifications
//!
//! The API client reports success messages and failures through a
//! [`Notifier`] instead of printing them, so a terminal, a desktop toast or
//! a test recorder can sit behind the same calls.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}

/// Sink for transient success/error notifications
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);

    /// Deliver a prepared [`Notification`].
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => self.success(&notification.message),
            NotificationKind::Error => self.error(&notification.message),
        }
    }
}

/// Notifier that turns notifications into tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "memberdesk::notify", message, "success");
    }

    fn error(&self, message: &str) {
        warn!(target: "memberdesk::notify", message, "error");
    }
}
