//! notify
//!
//! Desktop notification abstraction.
//!
//! # Modules
//!
//! - [`traits`] - The `Notifier` trait and notification types
//! - [`desktop`] - Platform helper implementation and the silent notifier
//! - [`mock`] - Recording notifier for tests
//!
//! # Design
//!
//! Notifications are fire-and-forget. Code that signals the user goes
//! through [`notify_best_effort`], which logs a failure and moves on.

pub mod desktop;
pub mod mock;
pub mod traits;

pub use desktop::{DesktopNotifier, SilentNotifier};
pub use traits::{Icon, Notification, Notifier, NotifyError};

/// Send a notification, swallowing any failure.
///
/// Returns whether delivery was attempted successfully; callers are free to
/// ignore the result.
pub fn notify_best_effort(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.send(notification) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(title = %notification.title, error = %err, "notification not delivered");
            false
        }
    }
}
