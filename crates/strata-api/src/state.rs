//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use strata_auth::jwt::JwtDecoder;
use strata_service::{AuthService, HealthService, SampleService};

/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Verifies bearer tokens for the protected route groups.
    pub jwt_decoder: Arc<JwtDecoder>,
    pub auth_service: Arc<AuthService>,
    pub sample_service: Arc<SampleService>,
    pub health_service: Arc<HealthService>,
}
