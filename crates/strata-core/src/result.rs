//! Convenience result type alias for Strata.

use crate::error::AppError;

/// A specialized `Result` type for Strata operations.
pub type AppResult<T> = Result<T, AppError>;
