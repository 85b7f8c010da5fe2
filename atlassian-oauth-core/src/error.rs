//! Error type shared by every client operation.

use serde_json::Value;
use thiserror::Error;

/// Result alias used throughout the client crates
pub type Result<T, E = OAuthError> = std::result::Result<T, E>;

/// Everything that can go wrong while talking to the Atlassian auth services
#[derive(Debug, Error)]
pub enum OAuthError {
  /// A required configuration field is missing, empty or of the wrong type.
  #[error("Invalid oauth config: {0}")]
  ConfigInvalid(String),
  /// A server-flow operation was invoked without a client secret.
  #[error("Server client requires the client secret is not empty")]
  MissingSecret,
  /// A secured endpoint was called with no access token stored.
  #[error("Accessible resources is a secured endpoint and there is not a valid access token currently set")]
  Unauthenticated,
  /// A token endpoint answered with a status outside the accepted range.
  #[error("Failed to get access token (HTTP {status} {status_text})")]
  HttpStatus {
    status: u16,
    status_text: String,
    body: Option<Value>,
  },
  /// The JWT-bearer flow was invoked without a user key or account id.
  #[error("No user identifier (userKey or userAccountId) provided")]
  NoIdentifier,
  /// An access token could not be decoded.
  #[error("Failed to decode access token: {0}")]
  Decode(String),
  /// The JWT-bearer assertion could not be signed.
  #[error("Failed to sign assertion: {0}")]
  Signing(#[source] jsonwebtoken::errors::Error),
  /// A header value supplied by the caller or derived from the token is not
  /// valid HTTP.
  #[error("Invalid header value for '{0}'")]
  InvalidHeader(String),
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl OAuthError {
  /// HTTP status carried by the error, if it came from a token endpoint.
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::HttpStatus { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// Parsed response body carried by the error, if any.
  pub const fn body(&self) -> Option<&Value> {
    match self {
      Self::HttpStatus { body, .. } => body.as_ref(),
      _ => None,
    }
  }
}
