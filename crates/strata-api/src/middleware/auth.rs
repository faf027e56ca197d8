//! Bearer-token authentication for the protected route groups.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use strata_auth::jwt::decoder::INVALID_TOKEN_MESSAGE;
use strata_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Verifies the `Authorization` header and attaches [`AuthUser`].
///
/// Every literal `Bearer`, then every literal `bearer`, is removed from
/// the header before trimming; any other casing stays part of the token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(extract_token)
        .unwrap_or_default();

    match state.jwt_decoder.decode(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser::from(claims));
            next.run(request).await
        }
        Err(_) => ApiError(AppError::authentication(INVALID_TOKEN_MESSAGE)).into_response(),
    }
}

fn extract_token(header: &str) -> String {
    header
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token("Bearer abc"), "abc");
        assert_eq!(extract_token("bearer abc "), "abc");
        assert_eq!(extract_token("  abc"), "abc");
        assert_eq!(extract_token("BEARER abc"), "BEARER abc");
    }
}
