//! Configuration helpers for the OAuth clients.
//!
//! These helpers centralize configuration lookup so that applications can
//! build a ready-to-use client from the `ATLASSIAN_*` environment variables or
//! from a TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use atlassian_oauth_core::ClientConfig;
pub use atlassian_oauth_core::consts::{
  ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_OFFLINE, ENV_REDIRECT_URI, ENV_SCOPE, ENV_STATE,
};

use crate::{AtlassianOAuthClient, AtlassianOAuthServerClient};

/// Check if a complete client configuration is available in the environment.
pub fn check_oauth_env() -> bool {
  ClientConfig::from_env().is_ok()
}

/// Creates an OAuth client from the `ATLASSIAN_*` environment variables.
pub fn create_oauth_client_from_env() -> Result<AtlassianOAuthClient> {
  let config = ClientConfig::from_env().context("Failed to read OAuth configuration")?;
  AtlassianOAuthClient::new(config).context("Failed to create OAuth client")
}

/// Creates a server client from the `ATLASSIAN_*` environment variables;
/// `ATLASSIAN_CLIENT_SECRET` must be set.
pub fn create_server_client_from_env() -> Result<AtlassianOAuthServerClient> {
  let config = ClientConfig::from_env().context("Failed to read OAuth configuration")?;
  AtlassianOAuthServerClient::new(config)
    .with_context(|| format!("Failed to create OAuth server client, is {ENV_CLIENT_SECRET} set?"))
}

/// Creates an OAuth client from a TOML configuration file.
pub fn create_oauth_client_from_file(path: &Path) -> Result<AtlassianOAuthClient> {
  let config = ClientConfig::load(path)?;
  AtlassianOAuthClient::new(config).context("Failed to create OAuth client")
}
