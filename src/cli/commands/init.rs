//! init command - Write a starter rules file

use anyhow::{bail, Result};

use super::open_project;
use crate::core::rules::RuleDocument;
use crate::engine::Context;
use crate::ui::output;

/// Write the starter rule set to the project's rules file.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `force` - Overwrite an existing rules file
pub fn init(ctx: &Context, force: bool) -> Result<()> {
    let project = open_project(ctx)?;
    let path = project.paths.rules_path();

    if path.exists() && !force {
        bail!(
            "rules file already exists at '{}'; use --force to overwrite it",
            path.display()
        );
    }

    RuleDocument::default_rules().save(&path)?;
    output::print(
        format!("Wrote starter rules to {}", path.display()),
        ctx.verbosity(),
    );
    Ok(())
}
