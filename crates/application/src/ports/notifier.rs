//! Notification port

use splitdeck_domain::Notification;

/// Port for showing transient notifications to the user.
///
/// Delivery must not block the caller; store actions notify from inside
/// async code.
pub trait Notifier: Send + Sync {
    /// Shows a notification.
    fn notify(&self, notification: Notification);
}
