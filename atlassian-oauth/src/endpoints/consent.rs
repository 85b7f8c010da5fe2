//! # Consent URL
//!
//! Builds the URL users are redirected to in order to grant the app access.

use atlassian_oauth_core::consts::AUDIENCE;
use atlassian_oauth_core::{ClientOptions, Result};
use url::Url;

use crate::client::AtlassianOAuthClient;

impl AtlassianOAuthClient {
  /// Get the consent URL to redirect a user to, with `overrides` merged over
  /// the stored configuration.
  ///
  /// Example output:
  /// `https://auth.atlassian.com/authorize?audience=api.atlassian.com&client_id=...&scope=read%3Ajira-user+offline_access&redirect_uri=...&response_type=code&prompt=consent&state=...`
  pub fn get_consent_url(&self, overrides: &ClientOptions) -> Result<String> {
    let config = self.config.merged(overrides);
    config.validate()?;

    let scope = config.scope.joined();
    let state = config.state.as_deref().unwrap_or_default();
    let url = Url::parse_with_params(
      &self.endpoints.consent_url,
      [
        ("audience", AUDIENCE),
        ("client_id", config.client_id.as_str()),
        ("scope", scope.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("response_type", "code"),
        ("prompt", "consent"),
        ("state", state),
      ],
    )?;

    Ok(url.into())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use atlassian_oauth_core::{OAuthError, ScopeList};
  use url::Url;

  use crate::client::AtlassianOAuthClient;
  use crate::test_support::test_config;

  fn query(url: &str) -> HashMap<String, String> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
  }

  #[test]
  fn test_consent_url() -> anyhow::Result<()> {
    let client = AtlassianOAuthClient::new(test_config())?;

    let url = client.get_consent_url(&Default::default())?;
    assert!(url.starts_with("https://auth.atlassian.com/authorize?audience=api.atlassian.com&client_id=test-client&"));
    assert!(url.contains("scope=read%3Ajira-user+offline_access"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fauth%2Fcallback%2Fatlassian"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("prompt=consent"));

    let params = query(&url);
    assert_eq!(params["scope"], "read:jira-user offline_access");
    assert_eq!(params["state"], "124352345235");
    assert_eq!(params["redirect_uri"], "https://example.com/auth/callback/atlassian");
    assert!(!params.contains_key("client_secret"));

    Ok(())
  }

  #[test]
  fn test_consent_url_applies_overrides() -> anyhow::Result<()> {
    let client = AtlassianOAuthClient::new(test_config())?;

    let url = client.get_consent_url(&atlassian_oauth_core::ClientOptions {
      scope: Some(ScopeList::One("read:jira-work".to_string())),
      state: Some("per-request".to_string()),
      ..Default::default()
    })?;

    let params = query(&url);
    assert_eq!(params["scope"], "read:jira-work");
    assert_eq!(params["state"], "per-request");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["prompt"], "consent");
    assert_eq!(client.config().state.as_deref(), Some("124352345235"));

    Ok(())
  }

  #[test]
  fn test_consent_url_rejects_invalid_override() -> anyhow::Result<()> {
    let client = AtlassianOAuthClient::new(test_config())?;

    let result = client.get_consent_url(&atlassian_oauth_core::ClientOptions {
      client_id: Some(String::new()),
      ..Default::default()
    });

    assert!(matches!(result, Err(OAuthError::ConfigInvalid(_))));
    Ok(())
  }
}
