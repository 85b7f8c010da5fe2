//! # Authenticated Requests
//!
//! Issues requests against secured endpoints with the stored access token.

use atlassian_oauth_core::{OAuthError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Body, Method, Response};
use tracing::{debug, instrument};

use crate::client::AtlassianOAuthClient;
use crate::consts::APPLICATION_JSON;

/// Method, headers and body of an authenticated request
#[derive(Debug, Default)]
pub struct FetchOptions {
  pub method: Method,
  pub headers: HeaderMap,
  pub body: Option<Body>,
}

impl FetchOptions {
  pub fn new(method: Method) -> Self {
    Self {
      method,
      ..Default::default()
    }
  }

  pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
    self.headers.insert(name, value);
    self
  }

  pub fn body(mut self, body: impl Into<Body>) -> Self {
    self.body = Some(body.into());
    self
  }
}

impl AtlassianOAuthClient {
  /// Execute a request on a secured endpoint.
  ///
  /// `Accept: application/json` and `Authorization: Bearer <token>` replace
  /// any caller-supplied headers of the same name. The response is returned
  /// untouched.
  #[instrument(skip(self, options), level = "debug")]
  pub async fn fetch_authenticated(&self, url: &str, options: FetchOptions) -> Result<Response> {
    let token = self.require_access_token()?;

    let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
      .map_err(|err| OAuthError::InvalidHeader(format!("{AUTHORIZATION}: {err}")))?;
    authorization.set_sensitive(true);

    let mut headers = options.headers;
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(AUTHORIZATION, authorization);

    debug!(method = %options.method, "Sending authenticated request");
    let mut request = self.client.request(options.method, url).headers(headers);
    if let Some(body) = options.body {
      request = request.body(body);
    }

    Ok(request.send().await?)
  }
}
