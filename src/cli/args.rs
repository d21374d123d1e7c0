//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if refactorit was started in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// refactorit - Run php-cs-fixer over the files you changed
#[derive(Parser, Debug)]
#[command(name = "refactorit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if refactorit was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output: only failures and errors are printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the fixer over every changed file
    #[command(
        name = "fix",
        long_about = "Run the fixer over every changed file.\n\n\
            Finds the files that changed relative to HEAD (or --base), hands each \
            of them to php-cs-fixer with the project's rules, and reports the \
            result per file. A failing file never stops the batch. When the batch \
            is done the fixer's cache file is removed and a desktop notification \
            is sent.",
        after_help = "\
EXAMPLES:
    # Fix everything you touched since the last commit
    refactorit fix

    # Fix everything that differs from develop
    refactorit fix --base develop

    # Fail the build when any file could not be fixed
    refactorit fix --strict --no-notify"
    )]
    Fix {
        /// Compare against this revision instead of HEAD
        #[arg(long, value_name = "REV")]
        base: Option<String>,

        /// Exit with status 1 if any file failed or the batch was interrupted
        #[arg(long)]
        strict: bool,

        /// Do not send desktop notifications
        #[arg(long)]
        no_notify: bool,
    },

    /// List the files the fixer would be run on
    #[command(name = "list")]
    List {
        /// Compare against this revision instead of HEAD
        #[arg(long, value_name = "REV")]
        base: Option<String>,
    },

    /// Write a starter rules file in the project root
    #[command(
        name = "init",
        long_about = "Write a starter rules file in the project root.\n\n\
            The rules file is a JSON object mapping php-cs-fixer rule names to \
            their configuration. `refactorit fix` refuses to run without it."
    )]
    Init {
        /// Overwrite an existing rules file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    refactorit completion bash >> ~/.bashrc

    # Zsh
    refactorit completion zsh >> ~/.zshrc

    # Fish
    refactorit completion fish > ~/.config/fish/completions/refactorit.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_fix_with_flags() {
        let cli = Cli::try_parse_from([
            "refactorit",
            "--quiet",
            "fix",
            "--base",
            "develop",
            "--strict",
        ])
        .unwrap();

        assert!(cli.quiet);
        match cli.command {
            Command::Fix {
                base,
                strict,
                no_notify,
            } => {
                assert_eq!(base.as_deref(), Some("develop"));
                assert!(strict);
                assert!(!no_notify);
            }
            other => panic!("expected fix, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["refactorit", "list", "--cwd", "/tmp/app", "--debug"]).unwrap();
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp/app")));
        assert!(cli.debug);
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["refactorit"]).is_err());
    }
}
