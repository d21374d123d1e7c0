//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the project (working directory, repository, configuration)
//! 2. Calls into the engine
//! 3. Formats and displays output
//!
//! Fatal setup errors (no repository, wrong VCS, bad config, missing rules)
//! are returned as `anyhow` errors and end the process with status 1.

mod completion;
mod fix;
mod init;
mod list;

pub use completion::completion;
pub use fix::fix;
pub use init::init;
pub use list::list;

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::paths::ProjectPaths;
use crate::engine::{self, Context};
use crate::git::Git;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Fix {
            base,
            strict,
            no_notify,
        } => fix(ctx, base.as_deref(), strict, no_notify),
        Command::List { base } => list(ctx, base.as_deref()).map(|()| ExitCode::SUCCESS),
        Command::Init { force } => init(ctx, force).map(|()| ExitCode::SUCCESS),
        Command::Completion { shell } => completion(shell).map(|()| ExitCode::SUCCESS),
    }
}

/// Everything a command needs to know about the project it runs in.
pub(crate) struct Project {
    pub git: Git,
    pub paths: ProjectPaths,
    pub config: Config,
}

/// Locate the repository, load configuration and resolve paths.
pub(crate) fn open_project(ctx: &Context) -> Result<Project> {
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;
    let (git, root) = engine::open_repository(&cwd)?;
    tracing::debug!(root = %root.display(), cwd = %cwd.display(), "opened repository");

    let loaded = Config::load(Some(&root)).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    for source in loaded.config.sources() {
        tracing::debug!(path = %source.display(), "loaded config file");
    }

    let paths = ProjectPaths::from_config(root, cwd, &loaded.config);
    Ok(Project {
        git,
        paths,
        config: loaded.config,
    })
}
