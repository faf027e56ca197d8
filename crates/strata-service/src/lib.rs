//! # strata-service
//!
//! Business logic service layer for Strata. Each service validates its
//! input and reaches downstream collaborators (repositories, proxies, the
//! publisher, the cache) through [`strata_core::bridge`].
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod health;
pub mod sample;

pub use auth::AuthService;
pub use health::HealthService;
pub use sample::{SampleReceiverHandler, SampleService};
