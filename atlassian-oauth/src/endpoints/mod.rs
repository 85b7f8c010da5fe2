//! # Atlassian OAuth Endpoints
//!
//! Endpoint implementations for the 3LO client, organized by flow: consent
//! URL construction, authorization-code exchange, and the secured resource
//! and profile lookups.

pub mod consent;
pub mod fetch;
pub mod resources;
pub mod token;

use atlassian_oauth_core::{OAuthError, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read a response body, returning the status alongside the body parsed as
/// JSON when possible.
pub(crate) async fn read_body(response: Response) -> Result<(StatusCode, String, Option<Value>)> {
  let status = response.status();
  let text = response.text().await?;
  let parsed = serde_json::from_str::<Value>(&text).ok();
  Ok((status, text, parsed))
}

/// Decode a response body into `T` without looking at the status.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
  let text = response.text().await?;
  Ok(serde_json::from_str(&text)?)
}

pub(crate) fn http_status_error(status: StatusCode, body: Option<Value>) -> OAuthError {
  OAuthError::HttpStatus {
    status: status.as_u16(),
    status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
    body,
  }
}
