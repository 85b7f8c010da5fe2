//! # Access Token Decoding
//!
//! Clients decode the access token they receive so callers can inspect its
//! claims. Decoding is a capability: [`JwtTokenDecoder`] reads the claims with
//! `jsonwebtoken`, [`NoopTokenDecoder`] opts out entirely.

use atlassian_oauth_core::{OAuthError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::{debug, warn};

/// Turns an access token into its claim set
pub trait TokenDecoder: Send + Sync {
  /// Decode `token`, returning `None` when this decoder does not produce
  /// claims.
  fn decode(&self, token: &str) -> Result<Option<Value>>;
}

/// Decoder that never produces claims
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTokenDecoder;

impl TokenDecoder for NoopTokenDecoder {
  fn decode(&self, _token: &str) -> Result<Option<Value>> {
    Ok(None)
  }
}

/// Decoder backed by `jsonwebtoken`
///
/// Without a key the claims are read without checking the signature, which is
/// how 3LO access tokens are handled today. With a key the signature and
/// expiry are verified.
#[derive(Clone, Default)]
pub struct JwtTokenDecoder {
  verification: Option<(DecodingKey, Algorithm)>,
}

impl JwtTokenDecoder {
  /// Decoder that reads claims without verifying the signature
  pub fn new() -> Self {
    Self::default()
  }

  /// Decoder that rejects tokens not signed by `key` with `algorithm`
  pub fn with_key(key: DecodingKey, algorithm: Algorithm) -> Self {
    Self {
      verification: Some((key, algorithm)),
    }
  }

  fn validation(&self) -> Validation {
    match &self.verification {
      Some((_, algorithm)) => {
        let mut validation = Validation::new(*algorithm);
        validation.validate_aud = false;
        validation
      }
      None => {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation
      }
    }
  }
}

impl TokenDecoder for JwtTokenDecoder {
  fn decode(&self, token: &str) -> Result<Option<Value>> {
    if token.is_empty() {
      return Ok(None);
    }

    let unverified_key;
    let key = match &self.verification {
      Some((key, _)) => key,
      None => {
        warn!("Signature verification of Atlassian OAuth 2 (3LO) tokens is not implemented; decoding claims only");
        unverified_key = DecodingKey::from_secret(&[]);
        &unverified_key
      }
    };

    let data = jsonwebtoken::decode::<Value>(token, key, &self.validation())
      .map_err(|err| OAuthError::Decode(err.to_string()))?;
    debug!(alg = ?data.header.alg, "Decoded access token");

    Ok(Some(data.claims))
  }
}
