//! Notifier that reports through `tracing`.

use splitdeck_application::ports::Notifier;
use splitdeck_domain::{Notification, NotificationLevel};

/// Emits every notification as a log event on the `splitdeck::notify`
/// target, at a level matching its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message.as_str();
        match notification.level {
            NotificationLevel::Success => tracing::info!(target: "splitdeck::notify", "{message}"),
            NotificationLevel::Warning => tracing::warn!(target: "splitdeck::notify", "{message}"),
            NotificationLevel::Error => tracing::error!(target: "splitdeck::notify", "{message}"),
        }
    }
}
