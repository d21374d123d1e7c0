//! list command - Show the files the fixer would be run on

use anyhow::{Context as _, Result};

use super::open_project;
use crate::engine::{ChangeSetFinder, Context};
use crate::ui::output;

/// Print the change set, one path per line, relative to the project root.
pub fn list(ctx: &Context, base: Option<&str>) -> Result<()> {
    let project = open_project(ctx)?;
    let paths = &project.paths;

    let files = ChangeSetFinder::new(&project.git, paths.root.clone(), project.config.extension())
        .with_base(base.map(str::to_string))
        .find_adjusted_files()
        .context("Failed to determine changed files")?;

    if files.is_empty() {
        output::print("No changed files.", ctx.verbosity());
        return Ok(());
    }

    // Paths are the command's output, so they are printed even when quiet.
    let shown: Vec<String> = files
        .iter()
        .map(|file| paths.relative_to_root(file).display().to_string())
        .collect();
    println!("{}", output::format_list(&shown, ""));
    Ok(())
}
