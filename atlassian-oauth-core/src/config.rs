//! # Client Configuration
//!
//! The configuration a client is constructed from, per-call overrides, and
//! the validator that gates every network operation. Configurations can be
//! built in code, read from the `ATLASSIAN_*` environment variables, or loaded
//! from a TOML file using the same camelCase keys as the JSON representation.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{
  ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_OFFLINE, ENV_REDIRECT_URI, ENV_SCOPE, ENV_STATE, REQUIRED_CONFIG_KEYS,
  SCOPE_SEPARATOR,
};
use crate::error::{OAuthError, Result};

/// Requested scopes, either a single (possibly space-separated) string or a
/// list of individual scopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeList {
  One(String),
  Many(Vec<String>),
}

impl ScopeList {
  /// Render the scopes the way the consent screen expects them.
  pub fn joined(&self) -> String {
    match self {
      Self::One(scope) => scope.clone(),
      Self::Many(scopes) => scopes.join(SCOPE_SEPARATOR),
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Self::One(scope) => scope.is_empty(),
      Self::Many(scopes) => scopes.is_empty(),
    }
  }
}

impl From<&str> for ScopeList {
  fn from(scope: &str) -> Self {
    Self::One(scope.to_string())
  }
}

impl<S: Into<String>> FromIterator<S> for ScopeList {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self::Many(iter.into_iter().map(Into::into).collect())
  }
}

const fn default_offline() -> bool {
  true
}

/// Configuration of an OAuth 2.0 (3LO) client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
  pub client_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub client_secret: Option<String>,
  pub redirect_uri: String,
  pub scope: ScopeList,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(default = "default_offline")]
  pub offline: bool,
}

/// Partial configuration merged over a [`ClientConfig`] for a single call
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub client_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub client_secret: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub redirect_uri: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scope: Option<ScopeList>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub offline: Option<bool>,
}

/// Stand-in printed for a configured secret
fn redacted(secret: Option<&String>) -> Option<&'static str> {
  secret.map(|_| "[redacted]")
}

impl fmt::Debug for ClientConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ClientConfig")
      .field("client_id", &self.client_id)
      .field("client_secret", &redacted(self.client_secret.as_ref()))
      .field("redirect_uri", &self.redirect_uri)
      .field("scope", &self.scope)
      .field("state", &self.state)
      .field("offline", &self.offline)
      .finish()
  }
}

impl fmt::Debug for ClientOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ClientOptions")
      .field("client_id", &self.client_id)
      .field("client_secret", &redacted(self.client_secret.as_ref()))
      .field("redirect_uri", &self.redirect_uri)
      .field("scope", &self.scope)
      .field("state", &self.state)
      .field("offline", &self.offline)
      .finish()
  }
}

impl ClientConfig {
  /// Create a configuration with offline access enabled and no secret or
  /// state set.
  pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>, scope: impl Into<ScopeList>) -> Self {
    Self {
      client_id: client_id.into(),
      client_secret: None,
      redirect_uri: redirect_uri.into(),
      scope: scope.into(),
      state: None,
      offline: default_offline(),
    }
  }

  pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
    self.client_secret = Some(client_secret.into());
    self
  }

  pub fn with_state(mut self, state: impl Into<String>) -> Self {
    self.state = Some(state.into());
    self
  }

  /// Check that every required field is present and non-empty.
  pub fn validate(&self) -> Result<()> {
    require_non_empty("clientId", Some(&self.client_id))?;
    require_non_empty("redirectUri", Some(&self.redirect_uri))?;
    if self.scope.is_empty() {
      return Err(OAuthError::ConfigInvalid(
        "scope must be a non-empty string or list of strings".to_string(),
      ));
    }
    require_non_empty("state", self.state.as_ref())?;
    Ok(())
  }

  /// Whether the configuration passes [`ClientConfig::validate`].
  pub fn is_valid(&self) -> bool {
    self.validate().is_ok()
  }

  /// Whether a non-empty client secret is configured.
  pub fn has_client_secret(&self) -> bool {
    self.client_secret.as_deref().is_some_and(|secret| !secret.is_empty())
  }

  /// Return a copy of this configuration with every field present in
  /// `options` replaced.
  pub fn merged(&self, options: &ClientOptions) -> Self {
    let mut config = self.clone();
    config.apply(options.clone());
    config
  }

  /// Merge `options` into this configuration in place.
  pub fn apply(&mut self, options: ClientOptions) {
    if let Some(client_id) = options.client_id {
      self.client_id = client_id;
    }
    if let Some(client_secret) = options.client_secret {
      self.client_secret = Some(client_secret);
    }
    if let Some(redirect_uri) = options.redirect_uri {
      self.redirect_uri = redirect_uri;
    }
    if let Some(scope) = options.scope {
      self.scope = scope;
    }
    if let Some(state) = options.state {
      self.state = Some(state);
    }
    if let Some(offline) = options.offline {
      self.offline = offline;
    }
  }

  /// Build a configuration from an untyped JSON candidate, rejecting it when
  /// [`is_valid_config`] does.
  pub fn from_value(value: Value) -> Result<Self> {
    if !is_valid_config(&value) {
      return Err(OAuthError::ConfigInvalid(format!(
        "expected string fields {}",
        REQUIRED_CONFIG_KEYS.join(", ")
      )));
    }
    let config: Self = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
  }

  /// Read the configuration from the `ATLASSIAN_*` environment variables.
  ///
  /// `ATLASSIAN_SCOPE` is split on single spaces. `ATLASSIAN_CLIENT_SECRET`
  /// and `ATLASSIAN_OFFLINE` are optional.
  pub fn from_env() -> anyhow::Result<Self> {
    let client_id = required_env(ENV_CLIENT_ID)?;
    let redirect_uri = required_env(ENV_REDIRECT_URI)?;
    let scope = required_env(ENV_SCOPE)?;
    let state = required_env(ENV_STATE)?;

    let mut config = Self::new(client_id, redirect_uri, scope.split(SCOPE_SEPARATOR).collect::<ScopeList>())
      .with_state(state);
    config.client_secret = std::env::var(ENV_CLIENT_SECRET).ok().filter(|secret| !secret.is_empty());
    if let Ok(offline) = std::env::var(ENV_OFFLINE) {
      config.offline = parse_bool(&offline).with_context(|| format!("Invalid value for {ENV_OFFLINE}: '{offline}'"))?;
    }

    config.validate().context("Configuration from environment is invalid")?;
    Ok(config)
  }

  /// Parse a TOML document into a validated configuration.
  pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
    let config: Self = toml::from_str(content).context("Failed to parse client configuration")?;
    config.validate().context("Client configuration is invalid")?;
    Ok(config)
  }

  /// Load a validated configuration from a TOML file.
  pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
    let path = path.as_ref();
    let content =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
    Self::from_toml_str(&content).with_context(|| format!("Failed to load config file {}", path.display()))
  }
}

/// Check an untyped configuration candidate: every required key must hold a
/// string, except `scope`, which may also hold an array of strings.
pub fn is_valid_config(value: &Value) -> bool {
  let Some(object) = value.as_object() else {
    return false;
  };

  REQUIRED_CONFIG_KEYS.iter().all(|key| match object.get(*key) {
    Some(Value::String(_)) => true,
    Some(Value::Array(items)) if *key == "scope" => items.iter().all(Value::is_string),
    _ => false,
  })
}

fn require_non_empty(field: &str, value: Option<&String>) -> Result<()> {
  match value {
    Some(value) if !value.is_empty() => Ok(()),
    _ => Err(OAuthError::ConfigInvalid(format!("{field} must be a non-empty string"))),
  }
}

fn required_env(name: &str) -> anyhow::Result<String> {
  match std::env::var(name) {
    Ok(value) if !value.is_empty() => Ok(value),
    _ => Err(anyhow::anyhow!("Environment variable '{name}' not set")),
  }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" => Ok(true),
    "0" | "false" | "no" => Ok(false),
    other => Err(anyhow::anyhow!("expected a boolean, got '{other}'")),
  }
}
