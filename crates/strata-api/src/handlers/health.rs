//! Health check handlers.

use axum::extract::State;

use super::{ApiResult, ok};
use crate::state::AppState;

/// GET /api/ping
pub async fn ping() -> ApiResult<&'static str> {
    ok("Ping OK")
}

/// GET /api/service
pub async fn service(State(state): State<AppState>) -> ApiResult<String> {
    ok(state.health_service.health_check().await)
}
