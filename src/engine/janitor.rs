//! engine::janitor
//!
//! Removes the cache artifact the fixer leaves in the project root.
//!
//! The contract is "delete if present, notify if deleted". Calling it twice
//! in a row is a no-op the second time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::notify::{notify_best_effort, Icon, Notification, Notifier};

/// Deletes the fixer's cache file.
pub struct CacheJanitor<'a> {
    cache_path: PathBuf,
    notifier: &'a dyn Notifier,
    remove: fn(&Path) -> io::Result<()>,
}

impl<'a> CacheJanitor<'a> {
    pub fn new(cache_path: PathBuf, notifier: &'a dyn Notifier) -> Self {
        Self {
            cache_path,
            notifier,
            remove: |path| fs::remove_file(path),
        }
    }

    /// Replace the file removal step.
    #[cfg(test)]
    pub(crate) fn with_remover(mut self, remove: fn(&Path) -> io::Result<()>) -> Self {
        self.remove = remove;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Delete the cache file if it exists.
    ///
    /// Returns whether a file was removed. A removal sends exactly one
    /// notification; finding nothing sends none.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file exists but cannot be removed.
    pub fn clean_up_cache_file(&self) -> io::Result<bool> {
        if !self.cache_path.is_file() {
            tracing::debug!(path = %self.cache_path.display(), "no cache file to remove");
            return Ok(false);
        }

        match (self.remove)(&self.cache_path) {
            Ok(()) => {}
            // Removed by someone else between the check and the delete.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err),
        }

        tracing::debug!(path = %self.cache_path.display(), "removed cache file");
        notify_best_effort(
            self.notifier,
            &Notification::new(
                "Garbage notification",
                "The garbage collector removed the php cache file!",
                Icon::Success,
            ),
        );
        Ok(true)
    }
}
