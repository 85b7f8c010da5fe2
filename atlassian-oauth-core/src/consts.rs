//! Constants for the Atlassian OAuth client.
//!
//! Endpoint URLs and grant identifiers are wire-compatible values and must not
//! change.

/// Consent screen for the 3LO authorization-code flow
pub const ATLASSIAN_CONSENT_URL: &str = "https://auth.atlassian.com/authorize";

/// Endpoint exchanging an authorization code for tokens
pub const ATLASSIAN_CODE_EXCHANGE_URL: &str = "https://auth.atlassian.com/oauth/token";

/// Sites the current access token can reach
pub const ATLASSIAN_ACCESSIBLE_RESOURCES_URL: &str = "https://api.atlassian.com/oauth/token/accessible-resources";

/// Profile of the user the access token was issued for
pub const ATLASSIAN_USER_PROFILE_URL: &str = "https://api.atlassian.com/me";

/// Default authorization server for the JWT-bearer (add-on) flow
pub const ATLASSIAN_TOKEN_URL: &str = "https://oauth-2-authorization-server.services.atlassian.com";

/// Default token path on [`ATLASSIAN_TOKEN_URL`]
pub const ATLASSIAN_TOKEN_PATH: &str = "/oauth2/token";

/// `audience` query parameter of the consent URL
pub const AUDIENCE: &str = "api.atlassian.com";

/// Lifetime of a JWT-bearer assertion, in seconds
pub const EXPIRE_IN_SECONDS: i64 = 60;

/// Prefix of every `iss`/`sub` claim in a JWT-bearer assertion
pub const JWT_CLAIM_PREFIX: &str = "urn:atlassian:connect";

/// Grant type of the code exchange
pub const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// Grant type of the add-on token request
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Separator between scopes in every wire representation
pub const SCOPE_SEPARATOR: &str = " ";

/// Keys a client configuration must carry
pub const REQUIRED_CONFIG_KEYS: [&str; 4] = ["clientId", "redirectUri", "scope", "state"];

/// Environment variable holding the OAuth client id
pub const ENV_CLIENT_ID: &str = "ATLASSIAN_CLIENT_ID";
/// Environment variable holding the OAuth client secret
pub const ENV_CLIENT_SECRET: &str = "ATLASSIAN_CLIENT_SECRET";
/// Environment variable holding the redirect (callback) URI
pub const ENV_REDIRECT_URI: &str = "ATLASSIAN_REDIRECT_URI";
/// Environment variable holding the space-separated scope list
pub const ENV_SCOPE: &str = "ATLASSIAN_SCOPE";
/// Environment variable holding the consent `state` value
pub const ENV_STATE: &str = "ATLASSIAN_STATE";
/// Environment variable toggling offline access
pub const ENV_OFFLINE: &str = "ATLASSIAN_OFFLINE";
