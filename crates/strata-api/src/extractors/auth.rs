//! `AuthUser` extractor: reads the identity the auth middleware attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use strata_auth::jwt::Claims;
use strata_auth::jwt::decoder::INVALID_TOKEN_MESSAGE;
use strata_core::error::AppError;

use crate::error::ApiError;

/// Identity of the caller of a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Numeric user id from the `sub` claim, 0 when it does not parse.
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id(),
            username: claims.username,
            email: claims.email,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::authentication(INVALID_TOKEN_MESSAGE).into())
    }
}
