//! # SmartChat CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Top-level behaviour of the `smartchat` binary: `--help`, `--version`,
//! verbosity and configuration file errors.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_main_help_flag() {
    smartchat_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("knowledge"));
}

#[test]
fn test_main_version_flag() {
    smartchat_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    smartchat_cmd()
        .arg("teleport")
        .assert()
        .failure()
        .stderr(predicate::str::contains("teleport"));
}

/// An explicit `--config` path that does not exist is reported before any
/// command runs.
#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .args(["--config", "nowhere.toml", "ask", "hi"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_project_config() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(".smartchat.toml"), "volume = 11\n").unwrap();
    isolated_cmd(dir.path())
        .args(["ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

/// `-vv` sends debug logs to stderr and leaves stdout to the reply.
#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .args(["-vv", "ask", "--no-color", "What are your hours?"])
        .assert()
        .success()
        .stdout("We're open from 9 AM to 5 PM, Monday through Friday.\n")
        .stderr(predicate::str::contains("DEBUG"));
}
