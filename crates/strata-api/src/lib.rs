//! # strata-api
//!
//! HTTP API layer for Strata built on Axum.
//!
//! Provides the `/api` routes, the bearer-token and request-logging
//! middleware, extractors, DTOs, and the mapping from `AppError` to the
//! JSON response envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
