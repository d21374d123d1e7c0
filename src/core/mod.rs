//! core
//!
//! Domain types shared by the engine and the CLI.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing
//! - [`rules`] - The rule document handed to the fixer

pub mod config;
pub mod paths;
pub mod rules;
