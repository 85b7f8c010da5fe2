//! Fixtures shared by the unit tests of this crate.

use atlassian_oauth_core::{ClientConfig, ScopeList, TokenData, TokenType};
use wiremock::MockServer;

use crate::client::{AtlassianOAuthClient, Endpoints};

pub(crate) fn test_config() -> ClientConfig {
  ClientConfig::new(
    "test-client",
    "https://example.com/auth/callback/atlassian",
    ["read:jira-user", "offline_access"].into_iter().collect::<ScopeList>(),
  )
  .with_client_secret("test-secret")
  .with_state("124352345235")
}

pub(crate) fn token_data(token: &str) -> TokenData {
  TokenData {
    token_type: TokenType::Access,
    token: token.to_string(),
    refresh_token: None,
    expires_in: 3600,
    scope: vec![],
    decoded: None,
  }
}

/// Client whose endpoints all point at `mock_server`
pub(crate) fn mock_client(mock_server: &MockServer) -> AtlassianOAuthClient {
  AtlassianOAuthClient::new(test_config())
    .expect("test config is valid")
    .with_endpoints(Endpoints::with_base_url(&mock_server.uri()))
}

/// Mock client that already holds `token`
pub(crate) fn authenticated_client(mock_server: &MockServer, token: &str) -> AtlassianOAuthClient {
  let mut client = mock_client(mock_server);
  client.set_access_token_data(Some(token_data(token)));
  client
}
