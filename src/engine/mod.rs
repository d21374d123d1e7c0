//! engine
//!
//! Orchestrates a run: Find -> Build -> Execute (per file) -> Clean up -> Notify.
//!
//! # Architecture
//!
//! ```text
//! ChangeSetFinder -> BatchRunner(files)
//!                      for each file: CommandBuilder -> ProcessRunner -> FileOutcome
//!                    -> CacheJanitor -> Notifier
//! ```
//!
//! The rule document is loaded by the caller before the runner is built, so
//! a missing rules file stops the run before any process is spawned.
//!
//! # Seams
//!
//! - [`finder::ChangeSource`] - where changed paths come from (git2)
//! - [`exec::ProcessRunner`] - how a fixer process is run
//! - [`crate::notify::Notifier`] - where notifications go

pub mod command;
pub mod exec;
pub mod finder;
pub mod interrupt;
pub mod janitor;
pub mod runner;

pub use command::{CommandBuilder, CommandError, FixCommand};
pub use exec::{ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use finder::{open_repository, ChangeSet, ChangeSetFinder, ChangeSource, FinderError, VcsKind};
pub use interrupt::Interrupt;
pub use janitor::CacheJanitor;
pub use runner::{BatchReport, BatchRunner, FileOutcome};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory refactorit acts in, always absolute.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        let current = std::env::current_dir()?;
        Ok(match &self.cwd {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => current.join(dir),
            None => current,
        })
    }
}
