//! Common test utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary directory holding property files for one test.
///
/// Files are removed when the fixture is dropped.
pub struct FileFixture {
    dir: TempDir,
}

impl FileFixture {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Writes `content` to `name` and returns its location as a string.
    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(&path, content).expect("failed to write fixture");
        path.to_string_lossy().into_owned()
    }

    /// Location of `name` inside the fixture, whether or not it exists.
    #[allow(dead_code)]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
