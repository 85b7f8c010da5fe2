//! # Authorization Code Exchange
//!
//! Exchanges the code received on the OAuth callback for an access token and
//! stores the result in the client state.

use atlassian_oauth_core::{
  ClientOptions, ClientStatePatch, CodeToTokenRequest, CodeToTokenResponse, Result, TokenData,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, instrument};

use super::{http_status_error, read_body};
use crate::client::{AtlassianOAuthClient, client_secret};
use crate::consts::APPLICATION_JSON;

/// Statuses the code exchange endpoint may answer with on success
pub fn is_code_exchange_success(status: u16) -> bool {
  (200..400).contains(&status)
}

impl AtlassianOAuthClient {
  /// Exchange an authorization code for an access token.
  ///
  /// The merged configuration must carry a client secret. On success the new
  /// token replaces any token held by the client.
  ///
  /// ```shell
  /// curl --request POST \
  ///    --url 'https://auth.atlassian.com/oauth/token' \
  ///    --header 'Content-Type: application/json' \
  ///    --data '{"grant_type": "authorization_code",
  ///        "client_id": "YOUR_CLIENT_ID",
  ///        "client_secret": "YOUR_CLIENT_SECRET",
  ///        "code": "YOUR_AUTHORIZATION_CODE",
  ///        "redirect_uri": "https://YOUR_APP_CALLBACK_URL"}'
  /// ```
  #[instrument(skip_all, level = "debug")]
  pub async fn retrieve_access_token(&mut self, code: &str, overrides: &ClientOptions) -> Result<TokenData> {
    let config = self.config.merged(overrides);
    let secret = client_secret(&config)?;
    config.validate()?;

    let request = CodeToTokenRequest::new(&config.client_id, secret, code, &config.redirect_uri);
    debug!(url = %self.endpoints.code_exchange_url, "Exchanging authorization code");

    let response = self
      .client
      .post(&self.endpoints.code_exchange_url)
      .header(CONTENT_TYPE, APPLICATION_JSON)
      .header(ACCEPT, APPLICATION_JSON)
      .json(&request)
      .send()
      .await?;

    let (status, text, body) = read_body(response).await?;
    if !is_code_exchange_success(status.as_u16()) {
      return Err(http_status_error(status, body));
    }

    let token_response = match body {
      Some(body) => serde_json::from_value::<CodeToTokenResponse>(body)?,
      None => serde_json::from_str::<CodeToTokenResponse>(&text)?,
    };
    let mut data = TokenData::from_code_exchange(token_response);
    debug!(expires_in = data.expires_in, scopes = data.scope.len(), "Received access token");

    // Decode first, then update instance state
    self.hydrate_token_data(&mut data);
    self.set_state(ClientStatePatch {
      access_token_data: Some(Some(data.clone())),
    });

    Ok(data)
  }
}

#[cfg(test)]
mod tests {
  use atlassian_oauth_core::{ClientOptions, OAuthError, TokenType};
  use wiremock::matchers::{body_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::decoder::NoopTokenDecoder;
  use crate::test_support::mock_client;

  #[tokio::test]
  async fn test_retrieve_access_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client = mock_client(&mock_server);

    Mock::given(method("POST"))
      .and(path("/oauth/token"))
      .and(header("content-type", "application/json"))
      .and(header("accept", "application/json"))
      .and(body_json(serde_json::json!({
          "grant_type": "authorization_code",
          "client_id": "test-client",
          "client_secret": "test-secret",
          "code": "auth-code",
          "redirect_uri": "https://example.com/auth/callback/atlassian"
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "access_token": "T",
          "refresh_token": "R",
          "expires_in": 3600,
          "scope": "read write"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let data = client.retrieve_access_token("auth-code", &ClientOptions::default()).await?;
    assert_eq!(
      data,
      TokenData {
        token_type: TokenType::Access,
        token: "T".to_string(),
        refresh_token: Some("R".to_string()),
        expires_in: 3600,
        scope: vec!["read".to_string(), "write".to_string()],
        decoded: None,
      }
    );
    assert!(client.is_authenticated());
    assert_eq!(client.access_token_data(), Some(&data));

    Ok(())
  }

  #[tokio::test]
  async fn test_retrieve_access_token_scope_list() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client = mock_client(&mock_server).with_decoder(NoopTokenDecoder);

    Mock::given(method("POST"))
      .and(path("/oauth/token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "access_token": "T",
          "scope": ["read:jira-work", "offline_access"]
      })))
      .mount(&mock_server)
      .await;

    let data = client.retrieve_access_token("auth-code", &ClientOptions::default()).await?;
    assert_eq!(data.scope, vec!["read:jira-work", "offline_access"]);
    assert_eq!(data.expires_in, -1);
    assert!(data.refresh_token.is_none());

    Ok(())
  }

  #[tokio::test]
  async fn test_retrieve_access_token_replaces_previous_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client = crate::test_support::authenticated_client(&mock_server, "old-token");

    Mock::given(method("POST"))
      .and(path("/oauth/token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "access_token": "new-token",
          "expires_in": 60
      })))
      .mount(&mock_server)
      .await;

    client.retrieve_access_token("auth-code", &ClientOptions::default()).await?;
    assert_eq!(client.access_token(), Some("new-token"));

    Ok(())
  }

  #[tokio::test]
  async fn test_retrieve_access_token_rejects_bad_request() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client = mock_client(&mock_server);

    Mock::given(method("POST"))
      .and(path("/oauth/token"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "error": "invalid_grant",
          "error_description": "Invalid authorization code"
      })))
      .mount(&mock_server)
      .await;

    let error = client
      .retrieve_access_token("bad-code", &ClientOptions::default())
      .await
      .unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert!(error.to_string().contains("Bad Request"));
    assert_eq!(
      error.body().and_then(|body| body["error"].as_str()),
      Some("invalid_grant")
    );
    assert!(!client.is_authenticated());

    Ok(())
  }

  #[tokio::test]
  async fn test_retrieve_access_token_requires_secret() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client = mock_client(&mock_server);
    client.config.client_secret = None;

    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&mock_server)
      .await;

    let result = client.retrieve_access_token("auth-code", &ClientOptions::default()).await;
    assert!(matches!(result, Err(OAuthError::MissingSecret)));

    Ok(())
  }

  #[tokio::test]
  async fn test_retrieve_access_token_secret_override() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let mut client = mock_client(&mock_server);
    client.config.client_secret = None;

    Mock::given(method("POST"))
      .and(path("/oauth/token"))
      .and(wiremock::matchers::body_string_contains("\"client_secret\":\"override-secret\""))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access_token": "T" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let overrides = ClientOptions {
      client_secret: Some("override-secret".to_string()),
      ..Default::default()
    };
    let data = client.retrieve_access_token("auth-code", &overrides).await?;
    assert_eq!(data.token, "T");

    Ok(())
  }

  #[test]
  fn test_code_exchange_status_range() {
    assert!(is_code_exchange_success(200));
    assert!(is_code_exchange_success(302));
    assert!(!is_code_exchange_success(400));
    assert!(!is_code_exchange_success(110));
    assert!(!is_code_exchange_success(500));
  }
}
