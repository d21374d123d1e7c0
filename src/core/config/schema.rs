//! core::config::schema
//!
//! Configuration schema types.
//!
//! The global file and the project file share one schema. Every field is
//! optional so a project file can override a single value of the global one.
//!
//! # Validation
//!
//! Values are validated after parsing: strings may not be empty and the
//! project-relative file names may not be absolute.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One configuration file (global or project scope).
///
/// # Example
///
/// ```toml
/// notifications = false
///
/// [fixer]
/// interpreter = "php8.2"
/// binary = "tools/php-cs-fixer/vendor/bin/php-cs-fixer"
/// extension = "php"
/// rules_file = "refactor-it.json"
/// cache_file = ".php_cs.cache"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Whether desktop notifications are sent
    pub notifications: Option<bool>,

    /// Fixer invocation settings
    pub fixer: Option<FixerSection>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fixer) = &self.fixer {
            fixer.validate()?;
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        let fixer = match (self.fixer, other.fixer) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, over) => over.or(base),
        };
        ConfigFile {
            notifications: other.notifications.or(self.notifications),
            fixer,
        }
    }
}

/// The `[fixer]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FixerSection {
    /// Interpreter used to launch the fixer (default: "php")
    pub interpreter: Option<String>,

    /// Fixer binary, relative to the working directory
    pub binary: Option<String>,

    /// File extension that qualifies a changed file (without the dot)
    pub extension: Option<String>,

    /// Rules document, relative to the project root
    pub rules_file: Option<String>,

    /// Cache artifact left behind by the fixer, relative to the project root
    pub cache_file: Option<String>,
}

impl FixerSection {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("fixer.interpreter", &self.interpreter),
            ("fixer.binary", &self.binary),
            ("fixer.extension", &self.extension),
            ("fixer.rules_file", &self.rules_file),
            ("fixer.cache_file", &self.cache_file),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
                }
            }
        }

        if let Some(ext) = &self.extension {
            if ext.starts_with('.') {
                return Err(ConfigError::InvalidValue(format!(
                    "fixer.extension must not start with a dot: '{}'",
                    ext
                )));
            }
        }

        for (key, value) in [
            ("fixer.rules_file", &self.rules_file),
            ("fixer.cache_file", &self.cache_file),
        ] {
            if let Some(value) = value {
                if Path::new(value).is_absolute() {
                    return Err(ConfigError::InvalidValue(format!(
                        "{} must be relative to the project root: '{}'",
                        key, value
                    )));
                }
            }
        }

        Ok(())
    }

    fn merge(self, other: FixerSection) -> FixerSection {
        FixerSection {
            interpreter: other.interpreter.or(self.interpreter),
            binary: other.binary.or(self.binary),
            extension: other.extension.or(self.extension),
            rules_file: other.rules_file.or(self.rules_file),
            cache_file: other.cache_file.or(self.cache_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let toml = r#"
            notifications = false

            [fixer]
            interpreter = "php8.2"
            binary = "bin/php-cs-fixer"
            extension = "phtml"
            rules_file = "config/rules.json"
            cache_file = ".cache"
        "#;

        let config: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(config.notifications, Some(false));
        let fixer = config.fixer.unwrap();
        assert_eq!(fixer.interpreter.as_deref(), Some("php8.2"));
        assert_eq!(fixer.extension.as_deref(), Some("phtml"));
    }

    #[test]
    fn empty_file_is_default() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str("colour = true");
        assert!(result.is_err());

        let result: Result<ConfigFile, _> = toml::from_str("[fixer]\nthreads = 4");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_empty_values() {
        let config = ConfigFile {
            fixer: Some(FixerSection {
                interpreter: Some("  ".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fixer.interpreter"));
    }

    #[test]
    fn validate_rejects_dotted_extension() {
        let config = ConfigFile {
            fixer: Some(FixerSection {
                extension: Some(".php".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_absolute_cache_file() {
        let config = ConfigFile {
            fixer: Some(FixerSection {
                cache_file: Some("/tmp/.php_cs.cache".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_prefers_overlay_values() {
        let global = ConfigFile {
            notifications: Some(true),
            fixer: Some(FixerSection {
                interpreter: Some("php7.4".to_string()),
                extension: Some("php".to_string()),
                ..Default::default()
            }),
        };
        let project = ConfigFile {
            notifications: None,
            fixer: Some(FixerSection {
                interpreter: Some("php8.3".to_string()),
                ..Default::default()
            }),
        };

        let merged = global.merge(project);
        assert_eq!(merged.notifications, Some(true));
        let fixer = merged.fixer.unwrap();
        assert_eq!(fixer.interpreter.as_deref(), Some("php8.3"));
        assert_eq!(fixer.extension.as_deref(), Some("php"));
    }

    #[test]
    fn merge_keeps_base_section_when_overlay_has_none() {
        let global = ConfigFile {
            fixer: Some(FixerSection {
                binary: Some("bin/fixer".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = global.clone().merge(ConfigFile::default());
        assert_eq!(merged, global);
    }
}
