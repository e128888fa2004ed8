//! Test support utilities for ghcrew integration tests.
//!
//! Provides an isolated working directory and a preconfigured command.

#![allow(dead_code)]

pub mod assertions;

#[allow(unused_imports)]
pub use assertions::*;

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Address nothing listens on, so API calls fail fast instead of leaving the machine.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Variables the binary reads; cleared so the host environment cannot leak in.
const CONFIG_VARS: &[&str] = &["TARGET_REPO", "ADMIN_USERNAME", "GITHUB_API_URL", "GHCREW_LOG"];

/// Test environment with an isolated working directory.
///
/// Child processes use `.current_dir()`, so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Test environment with a `.env` file holding `contents`.
    pub fn with_env_file(contents: &str) -> Self {
        let t = Self::new();
        fs::write(t.dir.path().join(".env"), contents).expect("failed to write .env");
        t
    }

    /// A ghcrew command with a clean configuration environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ghcrew").expect("failed to find ghcrew binary");
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        for slot in 1..=21 {
            cmd.env_remove(format!("PAT{}", slot));
            cmd.env_remove(format!("USERNAME{}", slot));
        }
        cmd.env("GITHUB_API_URL", UNREACHABLE_API);
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }
}
