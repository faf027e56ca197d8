//! HTTP request handlers organized by route group.

pub mod auth;
pub mod fallback;
pub mod health;
pub mod sample_v1;
pub mod sample_v2;

use axum::Json;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;

/// What every JSON handler returns.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}
