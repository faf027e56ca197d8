//! Per-request error collection.

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use strata_core::error::AppError;

/// Errors recorded while serving one request, in the order they were pushed.
///
/// The logging middleware installs one per request; handlers push
/// non-fatal errors that should show up in the request's log events.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink(Arc<Mutex<Vec<AppError>>>);

impl ErrorSink {
    pub fn push(&self, err: AppError) {
        self.lock().push(err);
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<AppError> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AppError>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ErrorSink {
    type Rejection = Infallible;

    /// Outside the logging middleware a detached sink is returned.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ErrorSink>()
            .cloned()
            .unwrap_or_default())
    }
}
