//! # Atlassian OAuth Core
//!
//! Shared building blocks for the Atlassian OAuth client: endpoint constants,
//! the scope registry, client configuration with its validator, the error
//! type, and the token/state models held by a client.

pub mod config;
pub mod consts;
pub mod error;
pub mod models;
pub mod scopes;

pub use config::{ClientConfig, ClientOptions, ScopeList, is_valid_config};
pub use error::{OAuthError, Result};
pub use models::{
  AccessibleResource, ClientState, ClientStatePatch, CodeToTokenRequest, CodeToTokenResponse, ExtendedProfile,
  TokenData, TokenType, UserProfile, normalize_scope,
};
pub use scopes::{AtlassianDefaultScope, ConfluenceScope, JiraScope, OAuthStandardScope};
