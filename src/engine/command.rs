//! engine::command
//!
//! Builds the fixer invocation for one file.
//!
//! # Shape
//!
//! ```text
//! <interpreter> <fixer-binary> fix <file> --format=json --allow-risky=yes --using-cache=no --rules=<json>
//! ```
//!
//! The command is an argument vector handed to the OS directly; no shell is
//! involved, so the inlined JSON needs no quoting.
//!
//! # Invariants
//!
//! - `build` is a pure function of its inputs
//! - The rules argument is always normalized (re-parsed and re-serialized)
//! - Tool-level caching is always disabled; refactorit owns the cache file

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::core::rules::RuleDocument;

/// Fixed flags passed on every invocation.
pub const FIXER_FLAGS: [&str; 3] = ["--format=json", "--allow-risky=yes", "--using-cache=no"];

/// Errors from building a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    #[error("failed to serialize rules: {0}")]
    Rules(#[from] serde_json::Error),
}

/// One external-process invocation as an ordered list of tokens.
///
/// The first token is the program, the rest are its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixCommand {
    tokens: Vec<String>,
}

impl FixCommand {
    /// The program to execute.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }
}

impl fmt::Display for FixCommand {
    /// Shell-quoted rendering for logs. Never executed through a shell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.tokens.iter().map(|t| shell_quote(t)).collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Builds [`FixCommand`]s for a fixed interpreter and fixer binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    interpreter: String,
    fixer_binary: PathBuf,
}

impl CommandBuilder {
    /// Create a builder.
    ///
    /// `fixer_binary` is expected to be resolved already, normally through
    /// [`crate::core::paths::ProjectPaths::fixer_binary_path`].
    pub fn new(interpreter: impl Into<String>, fixer_binary: PathBuf) -> Self {
        Self {
            interpreter: interpreter.into(),
            fixer_binary,
        }
    }

    /// The fixer binary this builder invokes.
    pub fn fixer_binary(&self) -> &Path {
        &self.fixer_binary
    }

    /// Build the invocation that fixes `file` with `rules`.
    pub fn build(&self, file: &Path, rules: &RuleDocument) -> Result<FixCommand, CommandError> {
        let binary = path_token(&self.fixer_binary)?;
        let file = path_token(file)?;
        let rules = inline_rules(rules)?;

        let mut tokens = vec![self.interpreter.clone(), binary, "fix".to_string(), file];
        tokens.extend(FIXER_FLAGS.iter().map(|flag| flag.to_string()));
        tokens.push(format!("--rules={}", rules));

        Ok(FixCommand { tokens })
    }
}

/// Serialize the rules for inlining into a single argument.
///
/// The document is serialized, parsed back and serialized again in compact
/// form so the argument never depends on how the rules were formatted on
/// disk.
pub fn inline_rules(rules: &RuleDocument) -> Result<String, CommandError> {
    let serialized = serde_json::to_string(&rules.to_json())?;
    let reparsed: Value = serde_json::from_str(&serialized)?;
    Ok(serde_json::to_string(&reparsed)?)
}

fn path_token(path: &Path) -> Result<String, CommandError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| CommandError::NonUtf8Path(path.to_path_buf()))
}

fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:@%+,".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules() -> RuleDocument {
        RuleDocument::from_json(json!({
            "array_syntax": { "syntax": "short" },
            "@PSR2": true
        }))
        .unwrap()
    }

    fn builder() -> CommandBuilder {
        CommandBuilder::new("php", PathBuf::from("/work/vendor/bin/php-cs-fixer"))
    }

    #[test]
    fn builds_expected_tokens() {
        let cmd = builder().build(Path::new("/work/src/a.php"), &rules()).unwrap();

        assert_eq!(
            &cmd.tokens,
            &[
                "php",
                "/work/vendor/bin/php-cs-fixer",
                "fix",
                "/work/src/a.php",
                "--format=json",
                "--allow-risky=yes",
                "--using-cache=no",
                r#"--rules={"@PSR2":true,"array_syntax":{"syntax":"short"}}"#,
            ]
        );
        assert_eq!(cmd.program(), "php");
        assert_eq!(cmd.args().len(), 7);
    }

    #[test]
    fn build_is_deterministic() {
        let b = builder();
        let file = Path::new("a.php");
        assert_eq!(b.build(file, &rules()).unwrap(), b.build(file, &rules()).unwrap());
    }

    #[test]
    fn inline_rules_is_compact() {
        let inlined = inline_rules(&rules()).unwrap();
        assert!(!inlined.contains(' '));
        assert!(!inlined.contains('\n'));
    }

    #[test]
    fn inline_rules_decodes_to_same_mapping() {
        let original = rules();
        let inlined = inline_rules(&original).unwrap();
        let decoded = RuleDocument::from_json(serde_json::from_str(&inlined).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn rules_with_quotes_stay_one_argument() {
        let rules = RuleDocument::from_json(json!({
            "header_comment": { "header": "It's \"ours\"" }
        }))
        .unwrap();
        let cmd = builder().build(Path::new("a.php"), &rules).unwrap();

        let last = cmd.args().last().unwrap();
        assert!(last.starts_with("--rules="));
        assert!(last.contains(r#"It's \"ours\""#));
    }

    #[test]
    fn display_quotes_json_argument() {
        let cmd = builder().build(Path::new("a.php"), &rules()).unwrap();
        let shown = cmd.to_string();
        assert!(shown.starts_with("php /work/vendor/bin/php-cs-fixer fix a.php --format=json"));
        assert!(shown.ends_with(r#"'--rules={"@PSR2":true,"array_syntax":{"syntax":"short"}}'"#));
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r#"'it'\''s'"#);
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("plain.php"), "plain.php");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"bad\xff.php"));
        assert!(matches!(
            builder().build(path, &rules()),
            Err(CommandError::NonUtf8Path(_))
        ));
    }
}
