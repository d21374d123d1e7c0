//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to Git for refactorit. All
//! repository queries flow through this interface, which returns structured
//! results and normalizes errors into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::RevisionNotFound`]: Baseline revision does not resolve
//!
//! # Example
//!
//! ```ignore
//! use refactorit::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for path in git.changed_paths(None)? {
//!     println!("{}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Baseline revision could not be resolved to a tree.
    #[error("revision not found: {rev}")]
    RevisionNotFound {
        /// The revision as given by the user
        rev: String,
    },

    /// Path in the repository is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    InvalidPath {
        /// Lossy rendering of the path
        path: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// The Git interface.
///
/// Read-only: refactorit never writes refs or objects. The fixer changes
/// files in the working tree; Git only tells us which files to hand it.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get the working directory of the repository.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Change Detection
    // =========================================================================

    /// List paths that changed relative to a baseline.
    ///
    /// With `base == None` the baseline is `HEAD`: staged and unstaged
    /// additions and modifications plus untracked files. With
    /// `base == Some(rev)` the tree of `rev` is compared against the index
    /// and working tree, plus untracked files.
    ///
    /// Deleted and conflicted paths are never reported. Paths are relative
    /// to the working directory, in git's (path-sorted) order, without
    /// duplicates.
    ///
    /// # Errors
    ///
    /// - [`GitError::RevisionNotFound`] if `rev` does not resolve to a tree
    pub fn changed_paths(&self, base: Option<&str>) -> Result<Vec<PathBuf>, GitError> {
        match base {
            None => self.status_paths(),
            Some(rev) => self.diff_paths(rev),
        }
    }

    fn status_paths(&self) -> Result<Vec<PathBuf>, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut paths = Vec::new();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_conflicted() || status.is_wt_deleted() || status.is_index_deleted() {
                continue;
            }

            let changed = status.is_index_new()
                || status.is_index_modified()
                || status.is_index_renamed()
                || status.is_index_typechange()
                || status.is_wt_new()
                || status.is_wt_modified()
                || status.is_wt_renamed()
                || status.is_wt_typechange();

            if !changed {
                continue;
            }

            let path = entry.path().ok_or_else(|| GitError::InvalidPath {
                path: String::from_utf8_lossy(entry.path_bytes()).into_owned(),
            })?;
            push_unique(&mut paths, PathBuf::from(path));
        }

        Ok(paths)
    }

    fn diff_paths(&self, rev: &str) -> Result<Vec<PathBuf>, GitError> {
        let tree = self
            .repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_tree())
            .map_err(|_| GitError::RevisionNotFound {
                rev: rev.to_string(),
            })?;

        let mut opts = git2::DiffOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            let qualifies = matches!(
                delta.status(),
                git2::Delta::Added
                    | git2::Delta::Modified
                    | git2::Delta::Renamed
                    | git2::Delta::Copied
                    | git2::Delta::Typechange
                    | git2::Delta::Untracked
            );
            if !qualifies {
                continue;
            }

            if let Some(path) = delta.new_file().path() {
                push_unique(&mut paths, path.to_path_buf());
            }
        }

        Ok(paths)
    }
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}
