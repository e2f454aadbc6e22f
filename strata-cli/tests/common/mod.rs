//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory for property files
//! - Command builders isolated from the caller's environment

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables read by the CLI that must not leak into tests.
const STRATA_VARS: [&str; 7] = [
    "STRATA_LOG_MODE",
    "STRATA_START_DELIMITER",
    "STRATA_END_DELIMITER",
    "STRATA_DEFAULT_SEPARATOR",
    "STRATA_IGNORE_UNRESOLVABLE",
    "STRATA_CASE_INSENSITIVE",
    "STRATA_OUTPUT_FORMAT",
];

/// Test environment with an isolated directory for property files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with the strata binary and a clean set of
    /// `STRATA_*` variables, but the process environment otherwise intact.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        for var in STRATA_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder that ignores environment variables as a
    /// property source.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--no-env");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the test directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create test directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Run a command and return its stdout, asserting success.
    pub fn stdout_of(&self, cmd: &mut Command) -> String {
        let output = cmd.output().expect("Failed to run strata");
        assert!(
            output.status.success(),
            "strata failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}
