//! # Server Client
//!
//! Code-flow client for server-side use, where the client secret is known at
//! construction time.

use std::ops::{Deref, DerefMut};

use atlassian_oauth_core::{ClientConfig, OAuthError, Result};

use crate::client::{AtlassianOAuthClient, Endpoints};
use crate::decoder::TokenDecoder;

/// OAuth client that refuses to exist without a client secret
pub struct AtlassianOAuthServerClient {
  inner: AtlassianOAuthClient,
}

impl AtlassianOAuthServerClient {
  /// Create a server client; the configuration must be valid and carry a
  /// non-empty client secret.
  pub fn new(config: ClientConfig) -> Result<Self> {
    Self::from_client(AtlassianOAuthClient::new(config)?)
  }

  /// Wrap an existing client, checking that it has a client secret.
  pub fn from_client(inner: AtlassianOAuthClient) -> Result<Self> {
    if !inner.is_client_secret_valid() {
      return Err(OAuthError::MissingSecret);
    }
    Ok(Self { inner })
  }

  pub fn with_decoder(self, decoder: impl TokenDecoder + 'static) -> Self {
    Self {
      inner: self.inner.with_decoder(decoder),
    }
  }

  pub fn with_endpoints(self, endpoints: Endpoints) -> Self {
    Self {
      inner: self.inner.with_endpoints(endpoints),
    }
  }

  pub fn into_inner(self) -> AtlassianOAuthClient {
    self.inner
  }
}

impl Deref for AtlassianOAuthServerClient {
  type Target = AtlassianOAuthClient;

  fn deref(&self) -> &Self::Target {
    &self.inner
  }
}

impl DerefMut for AtlassianOAuthServerClient {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.inner
  }
}

#[cfg(test)]
mod tests {
  use atlassian_oauth_core::ClientOptions;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::test_support::test_config;

  #[test]
  fn test_server_client_requires_secret() {
    let mut config = test_config();
    config.client_secret = None;
    assert!(matches!(
      AtlassianOAuthServerClient::new(config.clone()),
      Err(OAuthError::MissingSecret)
    ));

    config.client_secret = Some(String::new());
    assert!(matches!(
      AtlassianOAuthServerClient::new(config),
      Err(OAuthError::MissingSecret)
    ));
  }

  #[test]
  fn test_server_client_validates_config_first() {
    let mut config = test_config();
    config.state = None;

    assert!(matches!(
      AtlassianOAuthServerClient::new(config),
      Err(OAuthError::ConfigInvalid(_))
    ));
  }

  #[tokio::test]
  async fn test_server_client_exchanges_code() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client =
      AtlassianOAuthServerClient::new(test_config())?.with_endpoints(Endpoints::with_base_url(&mock_server.uri()));

    Mock::given(method("POST"))
      .and(path("/oauth/token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "access_token": "server-token",
          "refresh_token": "server-refresh",
          "expires_in": 3600,
          "scope": "read:jira-work offline_access"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let data = client.retrieve_access_token("auth-code", &ClientOptions::default()).await?;
    assert_eq!(data.refresh_token.as_deref(), Some("server-refresh"));
    assert!(client.is_authenticated());
    assert_eq!(client.into_inner().access_token(), Some("server-token"));

    Ok(())
  }
}
