//! engine::runner
//!
//! The batch runner: one fixer process per file, then cleanup.
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> (empty) ReportedEmpty -> Done
//! Idle -> (non-empty) Running -> CleaningUp -> Notifying -> Done
//! ```
//!
//! # Invariants
//!
//! - Files are attempted strictly in change-set order, one process at a time
//! - A failing file never stops the batch; there are no retries
//! - An empty change set spawns nothing, cleans nothing, notifies nothing
//! - A non-empty batch runs the janitor exactly once, after the last file,
//!   even when interrupted
//! - Notification failures are swallowed
//! - Console write failures are swallowed: a closed stdout never stops the
//!   batch or its cleanup
//!
//! No timeout is imposed on a fixer process: a hung fixer hangs the batch.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::command::CommandBuilder;
use super::exec::ProcessRunner;
use super::finder::ChangeSet;
use super::interrupt::Interrupt;
use super::janitor::CacheJanitor;
use crate::core::paths::relative_to;
use crate::core::rules::RuleDocument;
use crate::notify::{notify_best_effort, Icon, Notification, Notifier};
use crate::ui::banner;
use crate::ui::output::Verbosity;
use crate::ui::progress::Progress;

/// Message printed when there is nothing to do.
pub const NOTHING_TO_DO: &str = "There are no files yet to refactor!";

/// Result of running the fixer on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub success: bool,
    /// Captured diagnostic text; empty on success.
    pub output: String,
}

/// Summary of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per attempted file, in order.
    pub outcomes: Vec<FileOutcome>,
    /// Files never attempted because the batch was interrupted.
    pub skipped: usize,
    /// Whether the batch stopped early.
    pub interrupted: bool,
    /// Whether the janitor removed the cache file.
    pub cache_removed: bool,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }

    /// Every file attempted and fixed.
    pub fn is_clean(&self) -> bool {
        !self.interrupted && self.failed() == 0
    }
}

/// Drives one fixer invocation per file.
pub struct BatchRunner<'a> {
    builder: CommandBuilder,
    rules: &'a RuleDocument,
    process: &'a mut dyn ProcessRunner,
    janitor: CacheJanitor<'a>,
    notifier: &'a dyn Notifier,
    root: Option<PathBuf>,
    interrupt: Interrupt,
    verbosity: Verbosity,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        builder: CommandBuilder,
        rules: &'a RuleDocument,
        process: &'a mut dyn ProcessRunner,
        janitor: CacheJanitor<'a>,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            builder,
            rules,
            process,
            janitor,
            notifier,
            root: None,
            interrupt: Interrupt::new(),
            verbosity: Verbosity::Normal,
        }
    }

    /// Show file paths relative to `root`.
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    /// Stop spawning processes once `interrupt` is triggered.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the fixer over `files`, writing progress to `out`.
    ///
    /// Per-file failures are recorded in the returned [`BatchReport`].
    pub fn run(&mut self, files: &ChangeSet, out: &mut dyn Write) -> BatchReport {
        let quiet = self.verbosity.is_quiet();
        let mut console = Console::new(out);

        if files.is_empty() {
            if !quiet {
                console.line(format_args!("{}", banner::speak(NOTHING_TO_DO)));
            }
            return BatchReport::default();
        }

        if !quiet {
            console.line(format_args!("Refactoring..."));
            console.line(format_args!(""));
        }

        let mut report = BatchReport::default();
        let mut progress = Progress::new(files.len());

        for file in files {
            if self.interrupt.is_triggered() {
                report.interrupted = true;
                break;
            }

            let outcome = self.fix_one(file);

            if outcome.success {
                if !quiet {
                    console.line(format_args!(" {}", self.display_path(file).display()));
                }
            } else {
                console.line(format_args!("{}", outcome.output));
            }

            progress.advance();
            if !quiet {
                console.line(format_args!("{}", progress.render()));
            }
            report.outcomes.push(outcome);
        }
        report.skipped = files.len() - report.attempted();

        // Cleanup runs no matter how the loop ended.
        report.cache_removed = match self.janitor.clean_up_cache_file() {
            Ok(removed) => removed,
            Err(err) => {
                tracing::warn!(
                    path = %self.janitor.cache_path().display(),
                    error = %err,
                    "failed to remove fixer cache file"
                );
                false
            }
        };

        notify_best_effort(self.notifier, &completion_notification(&report));

        if !quiet {
            self.finish(&report, &mut console);
        }
        report
    }

    /// Build, spawn and classify the fixer run for one file.
    fn fix_one(&mut self, file: &Path) -> FileOutcome {
        let failure = |output: String| FileOutcome {
            path: file.to_path_buf(),
            success: false,
            output,
        };

        let command = match self.builder.build(file, self.rules) {
            Ok(command) => command,
            Err(err) => return failure(format!("{}: {}", file.display(), err)),
        };
        tracing::debug!(command = %command, "running fixer");

        match self.process.run(&command) {
            Ok(output) if output.success() => FileOutcome {
                path: file.to_path_buf(),
                success: true,
                output: String::new(),
            },
            Ok(output) => {
                tracing::debug!(path = %file.display(), code = ?output.code, "fixer failed");
                failure(output.diagnostic())
            }
            Err(err) => failure(format!("failed to run '{}': {}", command.program(), err)),
        }
    }

    fn display_path<'p>(&self, path: &'p Path) -> &'p Path {
        match &self.root {
            Some(root) => relative_to(root, path),
            None => path,
        }
    }

    fn finish(&self, report: &BatchReport, console: &mut Console<'_>) {
        console.line(format_args!(""));
        if report.interrupted {
            console.line(format_args!(
                "Interrupted: {} file(s) not attempted.",
                report.skipped
            ));
        }
        console.line(format_args!(
            "{} file(s) refactored, {} failed.",
            report.succeeded(),
            report.failed()
        ));

        let message = if report.interrupted {
            "Stopped early...\nThe cache has been cleaned up anyway."
        } else {
            "All done...\nYour code has been refactored!"
        };
        console.line(format_args!("{}", banner::speak(message)));
        console.line(format_args!(""));
        console.line(format_args!("{}", banner::signature()));
    }
}

/// Line-oriented console sink.
///
/// The first write error is logged and every later line is dropped.
struct Console<'w> {
    out: &'w mut dyn Write,
    broken: bool,
}

impl<'w> Console<'w> {
    fn new(out: &'w mut dyn Write) -> Self {
        Self { out, broken: false }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        let written = self
            .out
            .write_fmt(args)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = written {
            tracing::warn!(error = %err, "console output failed, continuing without it");
            self.broken = true;
        }
    }
}

fn completion_notification(report: &BatchReport) -> Notification {
    if report.interrupted {
        Notification::new(
            "Refactor interrupted",
            format!(
                "Stopped after {} of {} files.",
                report.attempted(),
                report.attempted() + report.skipped
            ),
            Icon::Failure,
        )
    } else if report.failed() > 0 {
        Notification::new(
            "Refactor complete",
            format!(
                "The refactor process is completed! {} file(s) could not be fixed.",
                report.failed()
            ),
            Icon::Failure,
        )
    } else {
        Notification::new(
            "Refactor complete",
            "The refactor process is completed!",
            Icon::Success,
        )
    }
}
