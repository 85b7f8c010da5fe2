//! # Atlassian OAuth Client
//!
//! OAuth 2.0 integration for Atlassian cloud and server APIs: consent URLs
//! and authorization-code exchange for the 3-legged (3LO) flow, authenticated
//! calls to the accessible-resources and profile endpoints, and the JWT-bearer
//! grant used by server add-ons.

pub mod auth;
mod client;
pub mod consts;
pub mod decoder;
mod endpoints;
pub mod jwt_bearer;
mod server;
#[cfg(test)]
mod test_support;

pub use atlassian_oauth_core::{
  AccessibleResource, ClientConfig, ClientOptions, ClientState, ClientStatePatch, ExtendedProfile, OAuthError,
  Result, ScopeList, TokenData, TokenType, UserProfile, is_valid_config, scopes,
};
// Re-export the clients
pub use client::{AtlassianOAuthClient, Endpoints, create_oauth_client};
pub use decoder::{JwtTokenDecoder, NoopTokenDecoder, TokenDecoder};
pub use endpoints::fetch::FetchOptions;
pub use jwt_bearer::{AccessTokenOptions, AssertionClaims, UserIdentifier, get_access_token};
pub use server::AtlassianOAuthServerClient;
