//! notify::traits
//!
//! Notification sink trait definition.
//!
//! # Design
//!
//! A notification is a title, a body and an icon selector. Delivery is best
//! effort: implementations report failures, callers decide to ignore them
//! (see [`super::notify_best_effort`]).

use thiserror::Error;

/// Errors from delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No notification mechanism exists on this platform.
    #[error("desktop notifications are not supported on this platform")]
    Unsupported,

    /// The notification helper could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// The notification helper ran but reported failure.
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: String },
}

/// Icon shown next to the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Failure,
}

impl Icon {
    /// Freedesktop icon name for this selector.
    pub fn freedesktop_name(self) -> &'static str {
        match self {
            Icon::Success => "dialog-information",
            Icon::Failure => "dialog-error",
        }
    }
}

/// A desktop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Icon,
}

impl Notification {
    /// Create a notification.
    pub fn new(title: impl Into<String>, body: impl Into<String>, icon: Icon) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon,
        }
    }
}

/// Trait for notification sinks.
///
/// Alternate platforms are added by implementing this trait; the batch
/// runner and the cache janitor only ever see `&dyn Notifier`.
pub trait Notifier {
    /// Deliver one notification.
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}
