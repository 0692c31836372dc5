//! Transient user notifications (toasts, snackbars, status lines).

use crate::platform::PlatformSendSync;
use serde::{Deserialize, Serialize};

/// How long the host should keep a notification on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationDuration {
    #[default]
    Short,
    Long,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub duration: NotificationDuration,
}

impl Notification {
    /// Short-lived notification with the given message.
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NotificationDuration::Short,
        }
    }

    /// Long-lived notification with the given message.
    pub fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NotificationDuration::Long,
        }
    }
}

/// Displays notifications to the user.
///
/// Fire-and-forget: the core never waits for, or retries, a notification.
pub trait UserNotifier: PlatformSendSync {
    fn notify(&self, notification: Notification);
}
