//! Constants for the atlassian-oauth client.

pub use atlassian_oauth_core::consts::*;

/// User-Agent header value for requests issued by the client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Media type sent in `Accept` and `Content-Type` headers
pub const APPLICATION_JSON: &str = "application/json";
