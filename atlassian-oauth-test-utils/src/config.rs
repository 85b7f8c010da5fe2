//! Configuration file management for testing
//!
//! This module provides a guard that writes a configuration file into a
//! per-test temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a temporary configuration file
///
/// The file and its directory are deleted when the guard is dropped.
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Write `content` to a file called `file_name` in a fresh temporary
  /// directory
  pub fn new(file_name: &str, content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write test config file");

    Self { temp_dir, path }
  }

  /// Get the path to the configuration file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Get the path to the temporary directory
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
