//! Input validation helper.

use validator::Validate;

use crate::error::AppError;
use crate::result::AppResult;

/// Validate a model, converting failures into a `Validation` [`AppError`].
pub fn validate<T: Validate>(model: &T) -> AppResult<()> {
    model.validate().map_err(AppError::from)
}
