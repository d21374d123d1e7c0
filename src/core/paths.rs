//! core::paths
//!
//! Centralized path routing for the files refactorit reads and deletes.
//!
//! # Architecture
//!
//! Every well-known location is computed here so that no other module joins
//! file names onto the project root by hand:
//! - the rules document and the fixer's cache artifact live under the
//!   **project root**
//! - the fixer binary is resolved against the **working directory**, in the
//!   dependency-binary location of whoever invokes refactorit
//!
//! The working directory and the project root usually coincide. They differ
//! when refactorit is started from a subdirectory of the repository.
//!
//! # Example
//!
//! ```
//! use refactorit::core::paths::ProjectPaths;
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::new(PathBuf::from("/work/app"), PathBuf::from("/work/app"));
//!
//! assert_eq!(paths.rules_path(), PathBuf::from("/work/app/refactor-it.json"));
//! assert_eq!(paths.cache_path(), PathBuf::from("/work/app/.php_cs.cache"));
//! assert_eq!(
//!     paths.fixer_binary_path(),
//!     PathBuf::from("/work/app/vendor/bin/php-cs-fixer")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::core::config::{
    Config, DEFAULT_CACHE_FILE, DEFAULT_FIXER_BINARY, DEFAULT_RULES_FILE, PROJECT_CONFIG_FILE,
};

/// Resolved locations for one run.
///
/// # Invariants
///
/// - `rules_path` and `cache_path` are always under `root`
/// - `fixer_binary_path` is always under `cwd`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project root (the repository work tree).
    pub root: PathBuf,

    /// Directory refactorit was invoked from.
    pub cwd: PathBuf,

    rules_file: PathBuf,
    cache_file: PathBuf,
    fixer_binary: PathBuf,
}

impl ProjectPaths {
    /// Create paths with the default file names.
    pub fn new(root: PathBuf, cwd: PathBuf) -> Self {
        Self {
            root,
            cwd,
            rules_file: PathBuf::from(DEFAULT_RULES_FILE),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            fixer_binary: PathBuf::from(DEFAULT_FIXER_BINARY),
        }
    }

    /// Create paths using the file names from configuration.
    pub fn from_config(root: PathBuf, cwd: PathBuf, config: &Config) -> Self {
        Self {
            root,
            cwd,
            rules_file: PathBuf::from(config.rules_file()),
            cache_file: PathBuf::from(config.cache_file()),
            fixer_binary: PathBuf::from(config.fixer_binary()),
        }
    }

    /// Path to the rules document.
    pub fn rules_path(&self) -> PathBuf {
        self.root.join(&self.rules_file)
    }

    /// Path to the fixer's cache artifact.
    pub fn cache_path(&self) -> PathBuf {
        self.root.join(&self.cache_file)
    }

    /// Path to the fixer binary.
    ///
    /// Resolved relative to the working directory's dependency-binary
    /// location, never relative to where refactorit itself is installed.
    pub fn fixer_binary_path(&self) -> PathBuf {
        self.cwd.join(&self.fixer_binary)
    }

    /// Path to the project config file for an arbitrary root.
    pub fn project_config_path_for(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_FILE)
    }

    /// Express `path` relative to the project root when it lies under it.
    pub fn relative_to_root<'a>(&self, path: &'a Path) -> &'a Path {
        relative_to(&self.root, path)
    }
}

/// `path` relative to `root`, or `path` unchanged when it lies elsewhere.
pub fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
