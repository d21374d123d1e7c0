//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`progress`] - Per-file progress indicator
//! - [`banner`] - Mascot speech bubble and signature
//!
//! # Design
//!
//! All console output goes through this module so that quiet mode is
//! honored in one place.

pub mod banner;
pub mod output;
pub mod progress;
