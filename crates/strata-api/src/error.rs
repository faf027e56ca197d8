//! Maps domain `AppError` to HTTP responses.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use strata_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

/// Content type of every error envelope.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// The error a handler returned, carried on the response for the logging
/// middleware.
#[derive(Debug, Clone)]
pub struct ResponseError(pub AppError);

/// HTTP status for an error: the explicit override, or one derived from
/// the kind.
pub fn status_of(err: &AppError) -> StatusCode {
    if let Some(status) = err.status.and_then(|s| StatusCode::from_u16(s).ok()) {
        return status;
    }
    match err.kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders `ApiResponse::error(message)` at `status`.
pub fn error_envelope(status: StatusCode, message: &str) -> Response {
    let body = serde_json::to_vec(&ApiResponse::<()>::error(message)).unwrap_or_default();
    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response
}

/// Handler error type; `?` converts any `AppError` into it.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = error_envelope(status_of(&self.0), &self.0.message);
        response.extensions_mut().insert(ResponseError(self.0));
        response
    }
}
