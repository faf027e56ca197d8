//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use strata_core::config::auth::AuthConfig;
use strata_core::error::{AppError, ErrorKind};
use strata_core::result::AppResult;

use super::claims::Claims;

/// Message reported for every rejected token.
pub const INVALID_TOKEN_MESSAGE: &str = "JWT token is invalid";

/// Verifies HS256 tokens and their time window.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks the signature, the algorithm, `exp` and `nbf`. Every failure
    /// is an `Authentication` error carrying [`INVALID_TOKEN_MESSAGE`].
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = %e, "Rejected JWT");
                AppError::with_source(ErrorKind::Authentication, INVALID_TOKEN_MESSAGE, e)
            })
    }
}
