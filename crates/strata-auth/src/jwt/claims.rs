//! JWT claims structure used in access tokens.

use serde::{Deserialize, Serialize};

/// JWT claims payload embedded in every access token.
///
/// Permission scopes are not part of the token yet; adding them means a new
/// field here and a check in the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the numeric user ID rendered as a string.
    pub sub: String,
    /// Username for convenience.
    pub username: String,
    /// Email, empty when the user has none.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Not-before timestamp (seconds since epoch).
    pub nbf: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim, or 0 if it is not numeric.
    pub fn user_id(&self) -> i64 {
        self.sub.parse().unwrap_or(0)
    }
}
