//! engine::finder
//!
//! Change detection: which files qualify for the fixer this run.
//!
//! # Algorithm
//!
//! 1. Walk up from the start directory looking for VCS metadata. The closest
//!    marker wins. Only Git is supported; any other kind is an error, and so
//!    is finding nothing at all.
//! 2. Ask the [`ChangeSource`] for paths changed since the baseline.
//! 3. Keep paths with the configured extension that are existing regular
//!    files, dropping duplicates and preserving discovery order.
//!
//! An empty [`ChangeSet`] is a normal outcome, not an error.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git::{Git, GitError};

/// Errors from change detection.
#[derive(Debug, Error)]
pub enum FinderError {
    /// No VCS metadata at or above the start directory.
    #[error("no version control system found at or above '{path}'; refactorit needs a git repository")]
    UnknownVcsType { path: PathBuf },

    /// VCS metadata found, but not of the supported kind.
    #[error("found a {found} repository at '{root}', but only git is supported")]
    WrongVcsType { found: VcsKind, root: PathBuf },

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Version control systems recognized by their metadata marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsKind {
    Git,
    Mercurial,
    Subversion,
    Bazaar,
    Darcs,
    Fossil,
    Cvs,
}

impl VcsKind {
    /// All recognized kinds, in detection order.
    pub const ALL: [VcsKind; 7] = [
        VcsKind::Git,
        VcsKind::Mercurial,
        VcsKind::Subversion,
        VcsKind::Bazaar,
        VcsKind::Darcs,
        VcsKind::Fossil,
        VcsKind::Cvs,
    ];

    /// Metadata entry that marks a working tree of this kind.
    pub fn marker(self) -> &'static str {
        match self {
            VcsKind::Git => ".git",
            VcsKind::Mercurial => ".hg",
            VcsKind::Subversion => ".svn",
            VcsKind::Bazaar => ".bzr",
            VcsKind::Darcs => "_darcs",
            VcsKind::Fossil => ".fslckout",
            VcsKind::Cvs => "CVS",
        }
    }

    /// Detect the closest working tree at or above `start`.
    ///
    /// Returns the kind and the directory holding its marker.
    pub fn detect(start: &Path) -> Option<(VcsKind, PathBuf)> {
        start.ancestors().find_map(|dir| {
            VcsKind::ALL
                .iter()
                .find(|kind| dir.join(kind.marker()).exists())
                .map(|kind| (*kind, dir.to_path_buf()))
        })
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "mercurial",
            VcsKind::Subversion => "subversion",
            VcsKind::Bazaar => "bazaar",
            VcsKind::Darcs => "darcs",
            VcsKind::Fossil => "fossil",
            VcsKind::Cvs => "cvs",
        };
        f.write_str(name)
    }
}

/// Capability: list paths changed since a baseline.
///
/// Paths are relative to the working tree root. Alternate backends are added
/// by implementing this trait.
pub trait ChangeSource {
    fn changed_files(&self, base: Option<&str>) -> Result<Vec<PathBuf>, FinderError>;
}

impl ChangeSource for Git {
    fn changed_files(&self, base: Option<&str>) -> Result<Vec<PathBuf>, FinderError> {
        Ok(self.changed_paths(base)?)
    }
}

/// Open the repository that contains `start`.
///
/// Returns the Git interface and the project root (its working directory).
///
/// # Errors
///
/// - [`FinderError::UnknownVcsType`] if no VCS metadata is found
/// - [`FinderError::WrongVcsType`] if the closest metadata is not Git's
pub fn open_repository(start: &Path) -> Result<(Git, PathBuf), FinderError> {
    match VcsKind::detect(start) {
        None => Err(FinderError::UnknownVcsType {
            path: start.to_path_buf(),
        }),
        Some((VcsKind::Git, dir)) => {
            let git = Git::open(&dir)?;
            let root = git.work_dir()?.to_path_buf();
            Ok((git, root))
        }
        Some((found, root)) => Err(FinderError::WrongVcsType { found, root }),
    }
}

/// Ordered, duplicate-free list of files to hand to the fixer.
///
/// Paths are absolute (joined onto the project root).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    files: Vec<PathBuf>,
}

impl ChangeSet {
    /// Build a change set, dropping later duplicates.
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::new();
        for file in files {
            if !unique.contains(&file) {
                unique.push(file);
            }
        }
        Self { files: unique }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Produces the change set for a run.
pub struct ChangeSetFinder<'a> {
    source: &'a dyn ChangeSource,
    root: PathBuf,
    extension: String,
    base: Option<String>,
}

impl<'a> ChangeSetFinder<'a> {
    /// Create a finder over `source` for files with `extension` under `root`.
    pub fn new(source: &'a dyn ChangeSource, root: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            source,
            root,
            extension: extension.into(),
            base: None,
        }
    }

    /// Compare against `base` instead of `HEAD`.
    pub fn with_base(mut self, base: Option<String>) -> Self {
        self.base = base;
        self
    }

    /// Determine the files that should be refactored.
    pub fn find_adjusted_files(&self) -> Result<ChangeSet, FinderError> {
        let changed = self.source.changed_files(self.base.as_deref())?;
        tracing::debug!(changed = changed.len(), base = ?self.base, "queried changed paths");

        let files = changed
            .into_iter()
            .filter(|rel| self.has_extension(rel))
            .map(|rel| self.root.join(rel))
            .filter(|abs| {
                let keep = abs.is_file();
                if !keep {
                    tracing::debug!(path = %abs.display(), "skipping path that is not a regular file");
                }
                keep
            });

        Ok(ChangeSet::new(files))
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct FixedSource(Vec<&'static str>);

    impl ChangeSource for FixedSource {
        fn changed_files(&self, _base: Option<&str>) -> Result<Vec<PathBuf>, FinderError> {
            Ok(self.0.iter().map(PathBuf::from).collect())
        }
    }

    fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "<?php\n").unwrap();
    }

    mod change_set {
        use super::*;

        #[test]
        fn drops_duplicates_keeping_order() {
            let set = ChangeSet::new(vec![
                PathBuf::from("/r/b.php"),
                PathBuf::from("/r/a.php"),
                PathBuf::from("/r/b.php"),
            ]);
            assert_eq!(
                set.as_slice(),
                &[PathBuf::from("/r/b.php"), PathBuf::from("/r/a.php")]
            );
        }

        #[test]
        fn empty_by_default() {
            assert!(ChangeSet::default().is_empty());
        }
    }

    mod finder {
        use super::*;

        #[test]
        fn keeps_matching_existing_files_in_order() {
            let dir = TempDir::new().unwrap();
            touch(&dir, "src/b.php");
            touch(&dir, "a.php");
            touch(&dir, "notes.txt");

            let source = FixedSource(vec!["src/b.php", "notes.txt", "a.php"]);
            let finder = ChangeSetFinder::new(&source, dir.path().to_path_buf(), "php");
            let set = finder.find_adjusted_files().unwrap();

            assert_eq!(
                set.as_slice(),
                &[dir.path().join("src/b.php"), dir.path().join("a.php")]
            );
        }

        #[test]
        fn skips_missing_files_and_directories() {
            let dir = TempDir::new().unwrap();
            fs::create_dir(dir.path().join("dir.php")).unwrap();

            let source = FixedSource(vec!["gone.php", "dir.php"]);
            let finder = ChangeSetFinder::new(&source, dir.path().to_path_buf(), "php");

            assert!(finder.find_adjusted_files().unwrap().is_empty());
        }

        #[test]
        fn extension_match_is_exact() {
            let dir = TempDir::new().unwrap();
            touch(&dir, "a.PHP");
            touch(&dir, "b.phps");
            touch(&dir, "php");

            let source = FixedSource(vec!["a.PHP", "b.phps", "php"]);
            let finder = ChangeSetFinder::new(&source, dir.path().to_path_buf(), "php");

            assert!(finder.find_adjusted_files().unwrap().is_empty());
        }

        #[test]
        fn no_changes_is_empty_not_error() {
            let dir = TempDir::new().unwrap();
            let source = FixedSource(vec![]);
            let finder = ChangeSetFinder::new(&source, dir.path().to_path_buf(), "php");

            assert!(finder.find_adjusted_files().unwrap().is_empty());
        }
    }

    mod vcs_detection {
        use super::*;

        #[test]
        fn nothing_found_is_unknown() {
            let dir = TempDir::new().unwrap();
            // The temp dir may itself live under a checkout; only assert when
            // nothing above it is versioned.
            if VcsKind::detect(dir.path()).is_none() {
                assert!(matches!(
                    open_repository(dir.path()),
                    Err(FinderError::UnknownVcsType { .. })
                ));
            }
        }

        #[test]
        fn mercurial_is_wrong_kind() {
            let dir = TempDir::new().unwrap();
            fs::create_dir(dir.path().join(".hg")).unwrap();

            match open_repository(dir.path()) {
                Err(FinderError::WrongVcsType { found, root }) => {
                    assert_eq!(found, VcsKind::Mercurial);
                    assert_eq!(root, dir.path());
                }
                other => panic!("expected WrongVcsType, got {:?}", other),
            }
        }

        #[test]
        fn closest_marker_wins() {
            let dir = TempDir::new().unwrap();
            fs::create_dir(dir.path().join(".svn")).unwrap();
            let nested = dir.path().join("nested");
            fs::create_dir_all(nested.join(".hg")).unwrap();

            let (kind, root) = VcsKind::detect(&nested.join("src")).unwrap();
            assert_eq!(kind, VcsKind::Mercurial);
            assert_eq!(root, nested);
        }

        #[test]
        fn display_names() {
            assert_eq!(VcsKind::Git.to_string(), "git");
            assert_eq!(VcsKind::Subversion.to_string(), "subversion");
        }
    }
}
