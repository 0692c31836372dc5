//! Notifications routed to `tracing`.

use bridge_traits::{Notification, NotificationDuration, UserNotifier};
use tracing::info;

/// Desktop [`UserNotifier`] that logs each notification at `info`.
///
/// Shells with a status bar can subscribe a `tracing` layer to
/// `bridge_desktop::notify` and render from there.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl UserNotifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let long = notification.duration == NotificationDuration::Long;
        info!(
            target: "bridge_desktop::notify",
            long,
            "{}",
            notification.message
        );
    }
}
