//! Envelope responses for requests no route accepts.

use axum::http::{Method, StatusCode, Uri};

use strata_core::error::AppError;

use crate::error::ApiError;

/// Any path without a route.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}

/// A known path requested with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    AppError::validation(format!("Method {method} is not allowed for {}", uri.path()))
        .with_status(StatusCode::METHOD_NOT_ALLOWED.as_u16())
        .into()
}
