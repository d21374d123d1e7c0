//! refactorit - Run an external style fixer over the files you changed
//!
//! refactorit finds the source files that differ from a Git baseline, hands
//! each of them to php-cs-fixer with a project-specific rule set, reports the
//! outcome per file and cleans up after the fixer when the batch is done.
//! It never parses or rewrites source code itself.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Change detection, command building and the batch runner
//! - [`core`] - Paths, configuration and the rule document
//! - [`git`] - Single interface for all Git operations
//! - [`notify`] - Desktop notification abstraction
//! - [`ui`] - Console output, progress and banners
//!
//! # Run Invariants
//!
//! 1. The rule document is loaded before any fixer process is spawned
//! 2. Every file in the change set is attempted, in order, one at a time
//! 3. Cleanup runs exactly once after a non-empty batch, even when interrupted
//! 4. Notification failures never fail a run

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod notify;
pub mod ui;
