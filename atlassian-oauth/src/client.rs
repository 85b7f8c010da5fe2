//! # Atlassian OAuth Client
//!
//! Client for the 3-legged OAuth (3LO) flow. It owns the configuration, the
//! in-memory token state and the decoder used to inspect access tokens; the
//! network operations live in the `endpoints` modules.

use std::sync::Arc;

use atlassian_oauth_core::consts::{
  ATLASSIAN_ACCESSIBLE_RESOURCES_URL, ATLASSIAN_CODE_EXCHANGE_URL, ATLASSIAN_CONSENT_URL, ATLASSIAN_USER_PROFILE_URL,
};
use atlassian_oauth_core::{
  ClientConfig, ClientOptions, ClientState, ClientStatePatch, OAuthError, Result, ScopeList, TokenData,
};
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::consts::USER_AGENT;
use crate::decoder::{JwtTokenDecoder, TokenDecoder};

/// Endpoint URLs used by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub consent_url: String,
  pub code_exchange_url: String,
  pub accessible_resources_url: String,
  pub user_profile_url: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      consent_url: ATLASSIAN_CONSENT_URL.to_string(),
      code_exchange_url: ATLASSIAN_CODE_EXCHANGE_URL.to_string(),
      accessible_resources_url: ATLASSIAN_ACCESSIBLE_RESOURCES_URL.to_string(),
      user_profile_url: ATLASSIAN_USER_PROFILE_URL.to_string(),
    }
  }
}

impl Endpoints {
  /// Serve every endpoint from a single host, keeping the Atlassian paths.
  pub fn with_base_url(base_url: &str) -> Self {
    let base_url = base_url.trim_end_matches('/');
    Self {
      consent_url: format!("{base_url}/authorize"),
      code_exchange_url: format!("{base_url}/oauth/token"),
      accessible_resources_url: format!("{base_url}/oauth/token/accessible-resources"),
      user_profile_url: format!("{base_url}/me"),
    }
  }
}

/// Represents an Atlassian OAuth 2.0 (3LO) client
pub struct AtlassianOAuthClient {
  pub(crate) client: Client,
  pub(crate) config: ClientConfig,
  pub(crate) state: ClientState,
  pub(crate) endpoints: Endpoints,
  pub(crate) decoder: Arc<dyn TokenDecoder>,
}

impl AtlassianOAuthClient {
  /// Create a new client, rejecting invalid configurations
  pub fn new(config: ClientConfig) -> Result<Self> {
    config.validate()?;
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    Ok(Self {
      client,
      config,
      state: ClientState::default(),
      endpoints: Endpoints::default(),
      decoder: Arc::new(JwtTokenDecoder::new()),
    })
  }

  /// Replace the decoder used to hydrate access tokens
  pub fn with_decoder(mut self, decoder: impl TokenDecoder + 'static) -> Self {
    self.decoder = Arc::new(decoder);
    self
  }

  /// Replace the endpoint URLs
  pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
    self.endpoints = endpoints;
    self
  }

  /// Replace the HTTP client
  pub fn with_http_client(mut self, client: Client) -> Self {
    self.client = client;
    self
  }

  pub const fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub const fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }

  /// Merge `options` into the stored configuration
  pub fn set_config(&mut self, options: ClientOptions) -> &ClientConfig {
    self.config.apply(options);
    &self.config
  }

  /// Whether the stored configuration is valid
  pub fn is_valid(&self) -> bool {
    self.config.is_valid()
  }

  /// Whether a non-empty client secret is configured
  pub fn is_client_secret_valid(&self) -> bool {
    self.config.has_client_secret()
  }

  pub const fn get_state(&self) -> &ClientState {
    &self.state
  }

  /// Merge a partial update into the state
  pub fn set_state(&mut self, patch: ClientStatePatch) -> &ClientState {
    self.state.apply(patch);
    &self.state
  }

  pub const fn access_token_data(&self) -> Option<&TokenData> {
    self.state.access_token_data.as_ref()
  }

  pub fn access_token(&self) -> Option<&str> {
    self.access_token_data().map(|data| data.token.as_str())
  }

  /// Whether a non-empty access token is stored
  pub fn is_authenticated(&self) -> bool {
    self.access_token().is_some_and(|token| !token.is_empty())
  }

  /// Store access token data, decoding the token first when it has not been
  /// decoded yet
  pub fn set_access_token_data(&mut self, access_token_data: Option<TokenData>) -> &ClientState {
    let access_token_data = access_token_data.map(|mut data| {
      self.hydrate_token_data(&mut data);
      data
    });
    self.set_state(ClientStatePatch {
      access_token_data: Some(access_token_data),
    })
  }

  /// Fill in `decoded` on best-effort basis; decode failures are logged and
  /// otherwise ignored.
  pub fn hydrate_token_data(&self, data: &mut TokenData) {
    if data.token.is_empty() || data.decoded.is_some() {
      return;
    }

    match self.decoder.decode(&data.token) {
      Ok(decoded) => data.decoded = decoded,
      Err(err) => warn!(error = %err, "Failed to decode access token, continuing without claims"),
    }
  }

  /// Decode an access token with the client's decoder
  pub fn decode_access_token(&self, token: &str) -> Result<Option<Value>> {
    self.decoder.decode(token)
  }

  /// Decode an access token, failing when no client secret is configured or
  /// the token cannot be decoded
  pub fn validate_access_token(&self, token: &str, overrides: &ClientOptions) -> Result<Option<Value>> {
    let config = self.config.merged(overrides);
    client_secret(&config)?;
    self.decode_access_token(token)
  }

  /// Stored access token, or [`OAuthError::Unauthenticated`]
  pub(crate) fn require_access_token(&self) -> Result<&str> {
    match self.access_token() {
      Some(token) if !token.is_empty() => Ok(token),
      _ => Err(OAuthError::Unauthenticated),
    }
  }
}

/// Non-empty client secret of `config`, or [`OAuthError::MissingSecret`]
pub(crate) fn client_secret(config: &ClientConfig) -> Result<&str> {
  match config.client_secret.as_deref() {
    Some(secret) if !secret.is_empty() => Ok(secret),
    _ => Err(OAuthError::MissingSecret),
  }
}

/// Create an OAuth client from its individual settings
pub fn create_oauth_client(
  client_id: &str,
  client_secret: Option<&str>,
  redirect_uri: &str,
  scope: impl Into<ScopeList>,
  state: &str,
) -> Result<AtlassianOAuthClient> {
  let mut config = ClientConfig::new(client_id, redirect_uri, scope).with_state(state);
  config.client_secret = client_secret.map(str::to_string);

  AtlassianOAuthClient::new(config)
}
