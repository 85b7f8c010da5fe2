//! Test utilities shared across the atlassian-oauth workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Temporary configuration files ([`ConfigFileGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use env::EnvVarGuard;
