//! Environment variable management for testing
//!
//! This module provides utilities for overriding a single environment variable
//! during a test and restoring it afterwards.

use std::env;

/// RAII guard over one environment variable
///
/// The variable is cleared on creation and restored to its original value (or
/// removed again) when the guard is dropped.
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Take control of `name`, clearing any value it currently has
  pub fn new(name: &str) -> Self {
    let original = env::var(name).ok();
    unsafe {
      env::remove_var(name);
    }

    Self {
      name: name.to_string(),
      original,
    }
  }

  /// Set the variable to `value`
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the variable
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }

  /// Name of the guarded variable
  pub fn name(&self) -> &str {
    &self.name
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    // Restore the original value
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
