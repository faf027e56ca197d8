//! # strata-core
//!
//! Core crate for Strata. Contains configuration schemas, the unified
//! error system with log-level classification, the request/response
//! bridge used by services to reach downstream collaborators, the
//! validation helper and the cache provider trait.
//!
//! This crate has **no** internal dependencies on other Strata crates.

pub mod bridge;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod validation;

pub use error::{AppError, ErrorKind, LogLevel};
pub use result::AppResult;
