//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module imports
//! `git2`. Change detection goes through `git2` exclusively (no shelling out
//! to the git CLI).
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Listing paths changed relative to `HEAD` or a given revision
//!
//! # Invariants
//!
//! - Read-only: no ref or object is ever written
//! - Reported paths are relative to the working directory

mod interface;

pub use interface::{Git, GitError};
