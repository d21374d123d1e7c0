//! engine::exec
//!
//! Running one fixer invocation as a child process.
//!
//! # Design
//!
//! The batch runner never touches `std::process` directly; it goes through
//! [`ProcessRunner`] so tests can script exit statuses and output. Each call
//! owns its child from spawn to exit: no process handle outlives `run`.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::command::FixCommand;

/// Captured result of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// A zero exit status is success; anything else (including death by
    /// signal) is failure.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The text to show the user when the process failed.
    ///
    /// Captured stdout and stderr verbatim apart from trailing whitespace,
    /// joined by a newline when both are present, or a synthesized line when
    /// the tool printed nothing.
    pub fn diagnostic(&self) -> String {
        let parts: Vec<&str> = [self.stdout.as_str(), self.stderr.as_str()]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(str::trim_end)
            .collect();

        if !parts.is_empty() {
            return parts.join("\n");
        }

        match self.code {
            Some(code) => format!("fixer exited with status {} and no output", code),
            None => "fixer was terminated by a signal".to_string(),
        }
    }
}

/// Capability: run a command to completion and capture its output.
pub trait ProcessRunner {
    fn run(&mut self, command: &FixCommand) -> io::Result<ProcessOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    cwd: PathBuf,
}

impl SystemProcessRunner {
    /// Create a runner that starts processes in `cwd`.
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&mut self, command: &FixCommand) -> io::Result<ProcessOutput> {
        let output = Command::new(command.program())
            .args(command.args())
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
