//! # Reactbot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through `reactbot_cmd()`.
//!
//! Commands are run inside a scratch directory that also serves as the user
//! config home, so a developer's own `.reactbot.toml` or user config never
//! leaks into a test run.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// # Get Reactbot Command (`reactbot_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `reactbot` binary.
///
/// ## Panics
/// Panics if the `reactbot` binary cannot be found via `Command::cargo_bin`.
pub fn reactbot_cmd() -> Command {
    Command::cargo_bin("reactbot").expect("Failed to find reactbot binary for testing")
}

/// An isolated working directory with an optional config file in it.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // Stops the project config search from climbing out of the sandbox.
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    /// Writes `content` to `name` inside the sandbox and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write sandbox file");
        path
    }

    /// A `reactbot` command running inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = reactbot_cmd();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env_remove("REACTBOT_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
