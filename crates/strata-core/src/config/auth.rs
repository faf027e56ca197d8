//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and refresh-token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Value of the `iss` claim on issued tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime in days. Enforced by the database.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: i32,
}

fn default_issuer() -> String {
    "Strata".to_string()
}

fn default_access_ttl() -> i64 {
    30
}

fn default_refresh_ttl() -> i32 {
    30
}
