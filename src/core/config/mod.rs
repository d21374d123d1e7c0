//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! refactorit has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Overrides checked in next to the code
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$REFACTORIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/refactorit/config.toml`
//! 3. `~/.refactorit/config.toml`
//!
//! # Project Config Location
//!
//! `<project root>/.refactorit.toml`
//!
//! # Example
//!
//! ```no_run
//! use refactorit::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Interpreter: {}", config.interpreter());
//! println!("Extension: {}", config.extension());
//! ```

pub mod schema;

pub use schema::{ConfigFile, FixerSection};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::ProjectPaths;

/// Default interpreter used to launch the fixer.
pub const DEFAULT_INTERPRETER: &str = "php";

/// Default fixer binary, relative to the working directory.
pub const DEFAULT_FIXER_BINARY: &str = "vendor/bin/php-cs-fixer";

/// Default extension of files handed to the fixer.
pub const DEFAULT_EXTENSION: &str = "php";

/// Default rules document name under the project root.
pub const DEFAULT_RULES_FILE: &str = "refactor-it.json";

/// Default cache artifact name under the project root.
pub const DEFAULT_CACHE_FILE: &str = ".php_cs.cache";

/// Project config file name under the project root.
pub const PROJECT_CONFIG_FILE: &str = ".refactorit.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply defaults; the project file already overrides the
/// global file in `merged`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    merged: ConfigFile,
    /// Files that contributed to this configuration, lowest precedence first
    sources: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// If `project_root` is provided, the project file under it is layered
    /// on top of the global file.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read, parsed or
    /// validated. Missing config files are not an error (defaults are used).
    pub fn load(project_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global = Self::find_global(&mut warnings);
        let project = project_root
            .map(ProjectPaths::project_config_path_for)
            .filter(|path| path.exists());

        let config = Self::from_files(global.as_deref(), project.as_deref())?;
        Ok(ConfigLoadResult { config, warnings })
    }

    /// Build configuration from explicit file locations.
    ///
    /// Either file may be absent.
    pub fn from_files(global: Option<&Path>, project: Option<&Path>) -> Result<Self, ConfigError> {
        let mut merged = ConfigFile::default();
        let mut sources = Vec::new();

        for path in [global, project].into_iter().flatten() {
            let file = Self::read_config(path)?;
            file.validate()?;
            merged = merged.merge(file);
            sources.push(path.to_path_buf());
        }

        Ok(Self { merged, sources })
    }

    /// Locate the global config file, if any.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $REFACTORIT_CONFIG
        if let Ok(path) = std::env::var("REFACTORIT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: "REFACTORIT_CONFIG points to a missing file; ignoring it".to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/refactorit/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("refactorit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.refactorit/config.toml
        dirs::home_dir()
            .map(|home| home.join(".refactorit/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Files that contributed to this configuration.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    fn fixer(&self) -> Option<&FixerSection> {
        self.merged.fixer.as_ref()
    }

    /// Interpreter that launches the fixer.
    ///
    /// Defaults to "php".
    pub fn interpreter(&self) -> &str {
        self.fixer()
            .and_then(|f| f.interpreter.as_deref())
            .unwrap_or(DEFAULT_INTERPRETER)
    }

    /// Fixer binary, relative to the working directory.
    ///
    /// Defaults to "vendor/bin/php-cs-fixer".
    pub fn fixer_binary(&self) -> &str {
        self.fixer()
            .and_then(|f| f.binary.as_deref())
            .unwrap_or(DEFAULT_FIXER_BINARY)
    }

    /// Extension that qualifies a changed file.
    ///
    /// Defaults to "php".
    pub fn extension(&self) -> &str {
        self.fixer()
            .and_then(|f| f.extension.as_deref())
            .unwrap_or(DEFAULT_EXTENSION)
    }

    /// Rules document name under the project root.
    pub fn rules_file(&self) -> &str {
        self.fixer()
            .and_then(|f| f.rules_file.as_deref())
            .unwrap_or(DEFAULT_RULES_FILE)
    }

    /// Cache artifact name under the project root.
    pub fn cache_file(&self) -> &str {
        self.fixer()
            .and_then(|f| f.cache_file.as_deref())
            .unwrap_or(DEFAULT_CACHE_FILE)
    }

    /// Whether desktop notifications are sent.
    ///
    /// Defaults to `true`.
    pub fn notifications(&self) -> bool {
        self.merged.notifications.unwrap_or(true)
    }
}
