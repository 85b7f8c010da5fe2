use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{AUTHORIZATION_CODE_GRANT_TYPE, SCOPE_SEPARATOR};

/// Kind of token held in [`TokenData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
  Access,
  Id,
}

/// Token obtained from a successful exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
  #[serde(rename = "type")]
  pub token_type: TokenType,
  pub token: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub refresh_token: Option<String>,
  /// Lifetime in seconds, `-1` when the server did not say
  pub expires_in: i64,
  #[serde(default)]
  pub scope: Vec<String>,
  /// Claims of `token`, when a decoder produced them
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub decoded: Option<Value>,
}

impl TokenData {
  /// Build access token data from a code exchange response.
  pub fn from_code_exchange(response: CodeToTokenResponse) -> Self {
    Self {
      token_type: TokenType::Access,
      token: response.access_token,
      refresh_token: response.refresh_token,
      expires_in: response.expires_in.unwrap_or(-1),
      scope: normalize_scope(&response.scope),
      decoded: None,
    }
  }
}

/// Normalize a `scope` response field: a string is split on single spaces, a
/// list is used as-is, anything else yields no scopes.
pub fn normalize_scope(scope: &Value) -> Vec<String> {
  match scope {
    Value::String(scopes) => scopes.split(SCOPE_SEPARATOR).map(str::to_string).collect(),
    Value::Array(scopes) => scopes.iter().filter_map(Value::as_str).map(str::to_string).collect(),
    _ => Vec::new(),
  }
}

/// In-memory state of a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientState {
  pub access_token_data: Option<TokenData>,
}

/// Partial update of [`ClientState`]; only fields that are `Some` are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientStatePatch {
  pub access_token_data: Option<Option<TokenData>>,
}

impl ClientState {
  /// Merge `patch` into the state.
  pub fn apply(&mut self, patch: ClientStatePatch) {
    if let Some(access_token_data) = patch.access_token_data {
      self.access_token_data = access_token_data;
    }
  }
}

/// Body of the authorization-code exchange request
#[derive(Debug, Clone, Serialize)]
pub struct CodeToTokenRequest<'a> {
  pub grant_type: &'static str,
  pub client_id: &'a str,
  pub client_secret: &'a str,
  pub code: &'a str,
  pub redirect_uri: &'a str,
}

impl<'a> CodeToTokenRequest<'a> {
  pub const fn new(client_id: &'a str, client_secret: &'a str, code: &'a str, redirect_uri: &'a str) -> Self {
    Self {
      grant_type: AUTHORIZATION_CODE_GRANT_TYPE,
      client_id,
      client_secret,
      code,
      redirect_uri,
    }
  }
}

/// Body of a successful authorization-code exchange response
#[derive(Debug, Clone, Deserialize)]
pub struct CodeToTokenResponse {
  pub access_token: String,
  pub refresh_token: Option<String>,
  pub expires_in: Option<i64>,
  /// Either a space-separated string or a list, see [`normalize_scope`]
  #[serde(default)]
  pub scope: Value,
}

/// A site the access token has been granted access to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibleResource {
  pub id: String,
  pub name: String,
  pub url: String,
  #[serde(default)]
  pub scopes: Vec<String>,
  pub avatar_url: Option<String>,
}

/// Profile of the user an access token belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  #[serde(default)]
  pub account_id: String,
  pub account_type: Option<String>,
  pub account_status: Option<String>,
  pub email: Option<String>,
  pub email_verified: Option<bool>,
  pub name: Option<String>,
  pub nickname: Option<String>,
  pub picture: Option<String>,
  pub zoneinfo: Option<String>,
  pub locale: Option<String>,
  pub extended_profile: Option<ExtendedProfile>,
}

/// Optional organizational details of a [`UserProfile`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProfile {
  pub job_title: Option<String>,
  pub organization: Option<String>,
  pub department: Option<String>,
  pub location: Option<String>,
}
