//! End-to-end tests for the `refactorit` binary.
//!
//! Each test builds a real git repository and points the fixer at a small
//! shell script, so the full flow (detect, fix, report, clean up) runs
//! without PHP installed.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Stands in for php-cs-fixer: fails on any file named `broken.php`,
/// records every other call, and leaves a cache file behind.
const FAKE_FIXER: &str = r#"#!/bin/sh
touch "$PWD/.php_cs.cache"
case "$2" in
  *broken.php) echo "Parse error in $2" >&2; exit 1 ;;
esac
echo "$2" >> "$PWD/fixer-calls.log"
exit 0
"#;

struct TestRepo {
    dir: TempDir,
    home: TempDir,
}

impl TestRepo {
    /// A committed repository with a fake fixer and notifications disabled.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        let repo = Self { dir, home };
        repo.write("README.md", "# Test Repo\n");
        repo.write("src/a.php", "<?php\n");
        run_git(repo.path(), &["add", "."]);
        run_git(repo.path(), &["commit", "-m", "Initial commit"]);

        repo.write("fake-fixer.sh", FAKE_FIXER);
        repo.write(
            ".refactorit.toml",
            "notifications = false\n\n[fixer]\ninterpreter = \"sh\"\nbinary = \"fake-fixer.sh\"\n",
        );
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn write_rules(&self) {
        self.write("refactor-it.json", "{\"@PSR2\": true}\n");
    }

    /// The binary, isolated from the user's global config.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("refactorit").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path())
            .env_remove("REFACTORIT_CONFIG")
            .env_remove("REFACTORIT_LOG");
        cmd
    }

    fn fixer_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("fixer-calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =============================================================================
// General
// =============================================================================

#[test]
fn help_lists_commands() {
    Command::cargo_bin("refactorit")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fix"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn outside_any_repository_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("refactorit")
        .unwrap()
        .args(["--cwd", dir.path().to_str().unwrap(), "fix", "--no-notify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no version control system"));
}

// =============================================================================
// fix
// =============================================================================

#[test]
fn missing_rules_file_is_fatal() {
    let repo = TestRepo::new();
    repo.write("src/a.php", "<?php echo 1;\n");

    repo.cmd()
        .args(["fix", "--no-notify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refactorit init"))
        .stdout(predicate::str::contains("Refactoring...").not());

    assert!(repo.fixer_calls().is_empty());
}

#[test]
fn no_changes_prints_nothing_to_do() {
    let repo = TestRepo::new();
    repo.write_rules();

    repo.cmd()
        .args(["fix", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are no files yet to refactor!"));

    assert!(repo.fixer_calls().is_empty());
}

#[test]
fn changed_files_are_fixed_and_cache_removed() {
    let repo = TestRepo::new();
    repo.write_rules();
    repo.write("src/a.php", "<?php echo 1;\n");
    repo.write("src/new/b.php", "<?php\n");
    repo.write("notes.txt", "not php\n");

    repo.cmd()
        .args(["fix", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Refactoring..."))
        .stdout(predicate::str::contains(" src/a.php"))
        .stdout(predicate::str::contains(" src/new/b.php"))
        .stdout(predicate::str::contains("2/2"))
        .stdout(predicate::str::contains("2 file(s) refactored, 0 failed."));

    let calls = repo.fixer_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].ends_with("src/a.php"));
    assert!(calls[1].ends_with("src/new/b.php"));
    assert!(!repo.path().join(".php_cs.cache").exists());
}

#[test]
fn failing_file_does_not_stop_the_batch() {
    let repo = TestRepo::new();
    repo.write_rules();
    repo.write("src/a.php", "<?php echo 1;\n");
    repo.write("src/broken.php", "<?php {\n");

    repo.cmd()
        .args(["fix", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse error in"))
        .stdout(predicate::str::contains("1 file(s) refactored, 1 failed."));

    assert_eq!(repo.fixer_calls().len(), 1);
    assert!(!repo.path().join(".php_cs.cache").exists());
}

#[test]
fn strict_mode_fails_when_a_file_fails() {
    let repo = TestRepo::new();
    repo.write_rules();
    repo.write("src/broken.php", "<?php {\n");

    repo.cmd()
        .args(["fix", "--no-notify", "--strict"])
        .assert()
        .failure();
}

#[test]
fn quiet_mode_still_reports_failures() {
    let repo = TestRepo::new();
    repo.write_rules();
    repo.write("src/a.php", "<?php echo 1;\n");
    repo.write("src/broken.php", "<?php {\n");

    repo.cmd()
        .args(["--quiet", "fix", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse error in"))
        .stdout(predicate::str::contains("Refactoring...").not());
}

// =============================================================================
// list / init
// =============================================================================

#[test]
fn list_shows_changed_php_files() {
    let repo = TestRepo::new();
    repo.write("src/a.php", "<?php echo 1;\n");
    repo.write("src/c.php", "<?php\n");

    repo.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/a.php"))
        .stdout(predicate::str::contains("src/c.php"))
        .stdout(predicate::str::contains("fake-fixer.sh").not());
}

#[test]
fn init_writes_rules_once() {
    let repo = TestRepo::new();

    repo.cmd().arg("init").assert().success();
    let written = fs::read_to_string(repo.path().join("refactor-it.json")).unwrap();
    assert!(written.contains("@PSR2"));

    repo.cmd()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    repo.cmd().args(["init", "--force"]).assert().success();
}
