//! # SmartChat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through these functions.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get SmartChat Command (`smartchat_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `smartchat` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn smartchat_cmd() -> Command {
    Command::cargo_bin("smartchat").expect("Failed to find smartchat binary for testing")
}

/// # Get Isolated Command (`isolated_cmd`)
///
/// Like `smartchat_cmd`, but runs inside `dir` with the home and config
/// directories pointed at it, so no user or project configuration from the
/// machine running the tests is picked up.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = smartchat_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("SMARTCHAT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
