//! # Accessible Resources and User Profile
//!
//! Read-only lookups on secured endpoints; both need a stored access token.

use atlassian_oauth_core::{AccessibleResource, Result, UserProfile};
use tracing::{instrument, warn};

use super::decode_json;
use super::fetch::FetchOptions;
use crate::client::AtlassianOAuthClient;

impl AtlassianOAuthClient {
  /// Get the sites the access token has been granted access to
  #[instrument(skip(self), level = "debug")]
  pub async fn get_accessible_resources(&self) -> Result<Vec<AccessibleResource>> {
    let response = self
      .fetch_authenticated(&self.endpoints.accessible_resources_url, FetchOptions::default())
      .await?;

    if !response.status().is_success() {
      warn!(status = %response.status(), "Accessible resources request was not successful");
    }
    decode_json(response).await
  }

  /// Get the profile of the user the access token was issued for
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user_profile(&self) -> Result<UserProfile> {
    let response = self
      .fetch_authenticated(&self.endpoints.user_profile_url, FetchOptions::default())
      .await?;

    if !response.status().is_success() {
      warn!(status = %response.status(), "User profile request was not successful");
    }
    decode_json(response).await
  }
}

#[cfg(test)]
mod tests {
  use atlassian_oauth_core::OAuthError;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::test_support::{authenticated_client, mock_client};

  #[tokio::test]
  async fn test_get_accessible_resources() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server, "access-token");

    Mock::given(method("GET"))
      .and(path("/oauth/token/accessible-resources"))
      .and(header("Authorization", "Bearer access-token"))
      .and(header("Accept", "application/json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
          {
              "id": "1324a887-45db-1bf4-1e99-ef0ff456d421",
              "name": "Site name",
              "url": "https://your-domain.atlassian.net",
              "scopes": ["write:jira-work", "read:jira-user", "manage:jira-configuration"],
              "avatarUrl": "https://site-admin-avatar-cdn.prod.public.atl-paas.net/avatars/240/flag.png"
          }
      ])))
      .mount(&mock_server)
      .await;

    let resources = client.get_accessible_resources().await?;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].name, "Site name");
    assert_eq!(resources[0].url, "https://your-domain.atlassian.net");
    assert_eq!(resources[0].scopes[1], "read:jira-user");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_user_profile() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server, "access-token");

    Mock::given(method("GET"))
      .and(path("/me"))
      .and(header("Authorization", "Bearer access-token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "account_type": "atlassian",
          "account_id": "112233aa-bb11-cc22-33dd-444444abcabc",
          "email": "mia@example.com",
          "name": "Mia Krystof",
          "account_status": "active",
          "extended_profile": {
              "job_title": "Designer"
          }
      })))
      .mount(&mock_server)
      .await;

    let profile = client.get_user_profile().await?;
    assert_eq!(profile.account_id, "112233aa-bb11-cc22-33dd-444444abcabc");
    assert_eq!(profile.name.as_deref(), Some("Mia Krystof"));
    assert_eq!(
      profile.extended_profile.and_then(|extended| extended.job_title).as_deref(),
      Some("Designer")
    );

    Ok(())
  }

  #[tokio::test]
  async fn test_get_accessible_resources_unauthenticated() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = mock_client(&mock_server);

    let result = client.get_accessible_resources().await;
    assert!(matches!(result, Err(OAuthError::Unauthenticated)));

    let result = client.get_user_profile().await;
    assert!(matches!(result, Err(OAuthError::Unauthenticated)));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_accessible_resources_unparseable_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = authenticated_client(&mock_server, "expired-token");

    Mock::given(method("GET"))
      .and(path("/oauth/token/accessible-resources"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "code": 401,
          "message": "Unauthorized"
      })))
      .mount(&mock_server)
      .await;

    let result = client.get_accessible_resources().await;
    assert!(matches!(result, Err(OAuthError::Json(_))));

    Ok(())
  }
}
