//! Auth handlers: login, token refresh, programmatic tokens, identity.

use axum::extract::State;

use strata_service::auth::{ProgrammaticTokenResponse, TokenResponse};

use super::{ApiResult, ok};
use crate::dto::request::{LoginRequest, ProgrammaticRequest, RefreshRequest};
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<TokenResponse> {
    ok(state.auth_service.login(req.into()).await?)
}

/// POST /api/v1/auth/access-token
pub async fn access_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> ApiResult<TokenResponse> {
    ok(state.auth_service.get_access_token(req.into()).await?)
}

/// POST /api/v1/auth/access-token/programmatic
pub async fn programmatic_access_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ProgrammaticRequest>,
) -> ApiResult<ProgrammaticTokenResponse> {
    ok(state
        .auth_service
        .get_programmatic_access_token(req.into())
        .await?)
}

/// GET /api/v1/auth
pub async fn me(user: AuthUser) -> ApiResult<String> {
    ok(format!(
        "id:{} user:{} email:{}",
        user.user_id, user.username, user.email
    ))
}
