//! notify::mock
//!
//! Recording notifier for deterministic testing.
//!
//! # Example
//!
//! ```
//! use refactorit::notify::mock::MockNotifier;
//! use refactorit::notify::{Icon, Notification, Notifier};
//!
//! let notifier = MockNotifier::new();
//! notifier
//!     .send(&Notification::new("Refactor complete", "done", Icon::Success))
//!     .unwrap();
//!
//! assert_eq!(notifier.sent().len(), 1);
//! assert_eq!(notifier.sent()[0].title, "Refactor complete");
//! ```

use std::sync::{Arc, Mutex};

use super::traits::{Notification, Notifier, NotifyError};

/// Mock notifier for testing.
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    inner: Arc<Mutex<MockNotifierInner>>,
}

#[derive(Debug, Default)]
struct MockNotifierInner {
    /// Every notification passed to `send`, including failed ones.
    sent: Vec<Notification>,
    /// Fail every send with `NotifyError::Unsupported`.
    fail: bool,
}

impl MockNotifier {
    /// Create a mock that accepts every notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every send fails.
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.inner.lock().expect("mock lock poisoned").fail = true;
        mock
    }

    /// Notifications passed to `send` so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.inner.lock().expect("mock lock poisoned").sent.clone()
    }
}

impl Notifier for MockNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut inner = self.inner.lock().expect("mock lock poisoned");
        inner.sent.push(notification.clone());
        if inner.fail {
            Err(NotifyError::Unsupported)
        } else {
            Ok(())
        }
    }
}
