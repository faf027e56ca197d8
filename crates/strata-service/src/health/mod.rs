//! Dependency health reporting.

pub mod service;

pub use service::HealthService;
