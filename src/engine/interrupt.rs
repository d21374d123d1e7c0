//! engine::interrupt
//!
//! External interruption of a batch.
//!
//! Ctrl-C sets a shared flag. The batch runner checks it before spawning
//! each fixer process: once set, no new process starts, but cleanup and the
//! completion notification still run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared interruption flag.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag that is set when the process receives Ctrl-C.
    ///
    /// # Errors
    ///
    /// Fails if a handler is already installed for this process.
    pub fn install_ctrlc() -> Result<Self, ctrlc::Error> {
        let interrupt = Self::new();
        let handle = interrupt.clone();
        ctrlc::set_handler(move || {
            handle.trigger();
        })?;
        Ok(interrupt)
    }

    /// Request that the batch stop.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let interrupt = Interrupt::new();
        let clone = interrupt.clone();
        assert!(!clone.is_triggered());

        interrupt.trigger();
        assert!(clone.is_triggered());
    }
}
