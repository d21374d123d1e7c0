//! fix command - Run the fixer over every changed file

use std::io;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::open_project;
use crate::core::rules::RuleDocument;
use crate::engine::{
    BatchRunner, CacheJanitor, ChangeSetFinder, CommandBuilder, Context, Interrupt,
    SystemProcessRunner,
};
use crate::notify::{DesktopNotifier, Notifier, SilentNotifier};
use crate::ui::output;

/// Run the fixer over every changed file.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `base` - Compare against this revision instead of HEAD
/// * `strict` - Exit with failure when any file failed or the run was interrupted
/// * `no_notify` - Suppress desktop notifications
///
/// # Exit Status
///
/// Success even when individual files fail, unless `strict` is set.
pub fn fix(ctx: &Context, base: Option<&str>, strict: bool, no_notify: bool) -> Result<ExitCode> {
    let verbosity = ctx.verbosity();
    let project = open_project(ctx)?;
    let paths = &project.paths;

    // Loaded before anything is spawned or printed: missing rules are fatal.
    let rules = RuleDocument::load(&paths.rules_path())?;
    tracing::debug!(rules = rules.len(), path = %paths.rules_path().display(), "loaded rules");

    let finder = ChangeSetFinder::new(&project.git, paths.root.clone(), project.config.extension())
        .with_base(base.map(str::to_string));
    let files = finder
        .find_adjusted_files()
        .context("Failed to determine changed files")?;

    let builder = CommandBuilder::new(project.config.interpreter(), paths.fixer_binary_path());
    if !files.is_empty() && !builder.fixer_binary().exists() {
        output::warn(
            format!(
                "fixer not found at '{}'; run `composer install` or set fixer.binary",
                builder.fixer_binary().display()
            ),
            verbosity,
        );
    }

    let notifier: Box<dyn Notifier> = if no_notify || !project.config.notifications() {
        Box::new(SilentNotifier)
    } else {
        Box::new(DesktopNotifier::new())
    };

    let interrupt = Interrupt::install_ctrlc().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not install Ctrl-C handler");
        Interrupt::new()
    });

    let janitor = CacheJanitor::new(paths.cache_path(), notifier.as_ref());
    let mut process = SystemProcessRunner::new(paths.cwd.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = BatchRunner::new(builder, &rules, &mut process, janitor, notifier.as_ref())
        .with_root(paths.root.clone())
        .with_interrupt(interrupt)
        .with_verbosity(verbosity)
        .run(&files, &mut out);

    tracing::debug!(
        attempted = report.attempted(),
        failed = report.failed(),
        interrupted = report.interrupted,
        "batch finished"
    );

    if strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
