//! # JWT-Bearer Grant
//!
//! Server add-ons obtain access tokens on behalf of a user by signing a JWT
//! assertion with the shared secret they received at installation time and
//! exchanging it at the Atlassian authorization server.

use std::fmt;

use atlassian_oauth_core::consts::{
  ATLASSIAN_TOKEN_PATH, ATLASSIAN_TOKEN_URL, EXPIRE_IN_SECONDS, JWT_BEARER_GRANT_TYPE, JWT_CLAIM_PREFIX,
  SCOPE_SEPARATOR,
};
use atlassian_oauth_core::{OAuthError, Result};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::consts::{APPLICATION_JSON, USER_AGENT};
use crate::endpoints::{http_status_error, read_body};

/// Claim set of a JWT-bearer assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
  pub iss: String,
  /// Fully qualified instance URL, e.g. `https://instance.atlassian.net`
  pub tnt: String,
  pub sub: String,
  pub aud: String,
  pub iat: i64,
  pub exp: i64,
}

/// User an access token is requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentifier {
  AccountId(String),
  UserKey(String),
}

impl UserIdentifier {
  /// Pick the identifier to use, preferring the account id. Empty values
  /// count as absent.
  pub fn resolve(user_account_id: Option<&str>, user_key: Option<&str>) -> Result<Self> {
    match (
      user_account_id.filter(|id| !id.is_empty()),
      user_key.filter(|key| !key.is_empty()),
    ) {
      (Some(account_id), _) => Ok(Self::AccountId(account_id.to_string())),
      (None, Some(user_key)) => Ok(Self::UserKey(user_key.to_string())),
      (None, None) => Err(OAuthError::NoIdentifier),
    }
  }

  /// The `sub` claim naming this user
  pub fn sub_claim(&self) -> String {
    match self {
      Self::AccountId(account_id) => format!("{JWT_CLAIM_PREFIX}:useraccountid:{account_id}"),
      Self::UserKey(user_key) => format!("{JWT_CLAIM_PREFIX}:userkey:{user_key}"),
    }
  }
}

/// Create the claim set authenticating the add-on to the authorization
/// server. `audience` defaults to [`ATLASSIAN_TOKEN_URL`].
pub fn create_generic_assertion_payload(
  host_base_url: &str,
  oauth_client_id: &str,
  sub_claim: &str,
  audience: Option<&str>,
) -> AssertionClaims {
  let now = Utc::now().timestamp();

  AssertionClaims {
    iss: format!("{JWT_CLAIM_PREFIX}:clientid:{oauth_client_id}"),
    tnt: host_base_url.to_string(),
    sub: sub_claim.to_string(),
    aud: audience.unwrap_or(ATLASSIAN_TOKEN_URL).to_string(),
    iat: now,
    exp: now + EXPIRE_IN_SECONDS,
  }
}

pub fn create_user_key_assertion_payload(
  host_base_url: &str,
  oauth_client_id: &str,
  user_key: &str,
  audience: Option<&str>,
) -> AssertionClaims {
  let sub_claim = UserIdentifier::UserKey(user_key.to_string()).sub_claim();
  create_generic_assertion_payload(host_base_url, oauth_client_id, &sub_claim, audience)
}

pub fn create_account_id_assertion_payload(
  host_base_url: &str,
  oauth_client_id: &str,
  account_id: &str,
  audience: Option<&str>,
) -> AssertionClaims {
  let sub_claim = UserIdentifier::AccountId(account_id.to_string()).sub_claim();
  create_generic_assertion_payload(host_base_url, oauth_client_id, &sub_claim, audience)
}

/// Sign `claims` with the shared secret (HS256).
pub fn sign_assertion(claims: &AssertionClaims, shared_secret: &str) -> Result<String> {
  jsonwebtoken::encode(
    &Header::default(),
    claims,
    &EncodingKey::from_secret(shared_secret.as_bytes()),
  )
  .map_err(OAuthError::Signing)
}

/// Render scopes for the token request: space-joined and upper-cased.
pub fn format_scopes(scopes: &[String]) -> String {
  scopes.join(SCOPE_SEPARATOR).to_uppercase()
}

/// Statuses the authorization server may answer with on success
pub fn is_jwt_bearer_success(status: u16) -> bool {
  (200..300).contains(&status)
}

/// Parameters of a JWT-bearer access token request
#[derive(Clone, Default)]
pub struct AccessTokenOptions {
  /// Fully qualified instance URL, e.g. `https://instance.atlassian.net`
  pub host_base_url: String,
  /// OAuth client id provided to the add-on at installation for `host_base_url`
  pub oauth_client_id: String,
  /// Shared secret provided to the add-on at installation for `host_base_url`
  pub shared_secret: String,
  /// `aud` claim; defaults to the authorization server base URL
  pub audience: Option<String>,
  /// Sent as `scope` whenever set, even when empty
  pub scopes: Option<Vec<String>>,
  pub user_account_id: Option<String>,
  /// Used only when no account id is given
  pub user_key: Option<String>,
  pub authorization_server_base_url: Option<String>,
  pub authorization_path: Option<String>,
}

impl fmt::Debug for AccessTokenOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AccessTokenOptions")
      .field("host_base_url", &self.host_base_url)
      .field("oauth_client_id", &self.oauth_client_id)
      .field("shared_secret", &"[redacted]")
      .field("audience", &self.audience)
      .field("scopes", &self.scopes)
      .field("user_account_id", &self.user_account_id)
      .field("user_key", &self.user_key)
      .field("authorization_server_base_url", &self.authorization_server_base_url)
      .field("authorization_path", &self.authorization_path)
      .finish()
  }
}

impl AccessTokenOptions {
  pub fn new(
    host_base_url: impl Into<String>,
    oauth_client_id: impl Into<String>,
    shared_secret: impl Into<String>,
  ) -> Self {
    Self {
      host_base_url: host_base_url.into(),
      oauth_client_id: oauth_client_id.into(),
      shared_secret: shared_secret.into(),
      ..Default::default()
    }
  }

  pub fn with_user_key(mut self, user_key: impl Into<String>) -> Self {
    self.user_key = Some(user_key.into());
    self
  }

  pub fn with_user_account_id(mut self, user_account_id: impl Into<String>) -> Self {
    self.user_account_id = Some(user_account_id.into());
    self
  }

  pub fn with_scopes<S: Into<String>>(mut self, scopes: impl IntoIterator<Item = S>) -> Self {
    self.scopes = Some(scopes.into_iter().map(Into::into).collect());
    self
  }

  fn server_base_url(&self) -> &str {
    self.authorization_server_base_url.as_deref().unwrap_or(ATLASSIAN_TOKEN_URL)
  }

  /// Build the claim set for this request.
  pub fn assertion_claims(&self) -> Result<AssertionClaims> {
    let identifier = UserIdentifier::resolve(self.user_account_id.as_deref(), self.user_key.as_deref())?;
    let audience = self.audience.as_deref().unwrap_or(self.server_base_url());

    Ok(create_generic_assertion_payload(
      &self.host_base_url,
      &self.oauth_client_id,
      &identifier.sub_claim(),
      Some(audience),
    ))
  }

  /// URL the assertion is posted to
  pub fn token_url(&self) -> String {
    let path = self.authorization_path.as_deref().unwrap_or(ATLASSIAN_TOKEN_PATH);
    format!("{}{}", self.server_base_url(), path)
  }
}

/// Retrieve an access token for a user and instance with a JWT assertion
/// signed by the add-on's shared secret.
///
/// Resolves with the authorization server's JSON response as-is. Redirects
/// are not followed, so a 3xx answer is rejected like any other non-2xx one.
pub async fn get_access_token(options: &AccessTokenOptions) -> Result<Value> {
  let client = Client::builder()
    .user_agent(USER_AGENT)
    .redirect(Policy::none())
    .build()?;
  get_access_token_with_client(&client, options).await
}

/// [`get_access_token`] using an existing HTTP client.
///
/// `client` must be built with [`Policy::none`]; a client that follows
/// redirects would report the redirect target's answer instead of the 3xx.
#[instrument(skip_all, fields(host = %options.host_base_url), level = "debug")]
pub async fn get_access_token_with_client(client: &Client, options: &AccessTokenOptions) -> Result<Value> {
  let claims = options.assertion_claims()?;
  let assertion = sign_assertion(&claims, &options.shared_secret)?;

  let mut form = vec![("grant_type", JWT_BEARER_GRANT_TYPE.to_string()), ("assertion", assertion)];
  if let Some(scopes) = options.scopes.as_deref() {
    form.push(("scope", format_scopes(scopes)));
  }

  let url = options.token_url();
  debug!(%url, sub = %claims.sub, "Requesting access token with JWT assertion");

  let response = client
    .post(&url)
    .header(ACCEPT, APPLICATION_JSON)
    .form(&form)
    .send()
    .await?;

  let (status, text, body) = read_body(response).await?;
  let body = body.unwrap_or(Value::String(text));
  if !is_jwt_bearer_success(status.as_u16()) {
    return Err(http_status_error(status, Some(body)));
  }

  Ok(body)
}
