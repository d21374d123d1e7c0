//! core::rules
//!
//! The rule document handed to the fixer.
//!
//! # Format
//!
//! A JSON object mapping rule names to their configuration. Values are
//! arbitrary JSON; refactorit never interprets them.
//!
//! ```json
//! {
//!     "@PSR2": true,
//!     "array_syntax": { "syntax": "short" }
//! }
//! ```
//!
//! # Invariants
//!
//! - A loaded document is a non-empty object
//! - Serialization is symmetric: `from_json(to_json(doc)) == doc`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from loading or saving the rule document.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The rules file does not exist. Absence is always fatal.
    #[error(
        "the refactor rules file was not found at '{path}'! Try running `refactorit init` in the root of your project"
    )]
    NotFound { path: PathBuf },

    #[error("failed to read rules file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse rules file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid rules document: {0}")]
    Invalid(String),

    #[error("failed to write rules file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Mapping from rule name to rule configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleDocument {
    rules: BTreeMap<String, Value>,
}

impl RuleDocument {
    /// Build a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `RulesError::Invalid` if the value is not an object or is empty.
    pub fn from_json(value: Value) -> Result<Self, RulesError> {
        match value {
            Value::Object(map) if map.is_empty() => {
                Err(RulesError::Invalid("the rule set is empty".to_string()))
            }
            Value::Object(map) => Ok(Self {
                rules: map.into_iter().collect(),
            }),
            other => Err(RulesError::Invalid(format!(
                "expected a JSON object of rules, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// The document as a JSON value.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.rules
                .iter()
                .map(|(name, config)| (name.clone(), config.clone()))
                .collect(),
        )
    }

    /// Load the document persisted at `path`.
    ///
    /// # Errors
    ///
    /// - [`RulesError::NotFound`] if the file does not exist
    /// - [`RulesError::Parse`] if it is not valid JSON
    /// - [`RulesError::Invalid`] if it is not a non-empty object
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        if !path.exists() {
            return Err(RulesError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| RulesError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let value: Value = serde_json::from_str(&contents).map_err(|e| RulesError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(value)
    }

    /// Persist the document at `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), RulesError> {
        let mut contents = serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| RulesError::Invalid(e.to_string()))?;
        contents.push('\n');

        fs::write(path, contents).map_err(|e| RulesError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Starter rule set written by `refactorit init`.
    pub fn default_rules() -> Self {
        let rules = [
            ("@PSR2", serde_json::json!(true)),
            ("array_syntax", serde_json::json!({ "syntax": "short" })),
            ("ordered_imports", serde_json::json!(true)),
            ("no_unused_imports", serde_json::json!(true)),
        ];
        Self {
            rules: rules
                .into_iter()
                .map(|(name, config)| (name.to_string(), config))
                .collect(),
        }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a loaded document.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
