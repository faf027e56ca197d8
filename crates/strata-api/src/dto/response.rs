//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Envelope every endpoint answers with.
///
/// `Code` is 0 on success and 1 on failure; `Data` is null on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub code: u8,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            code: 0,
            message: "Success".to_string(),
        }
    }

    /// Creates a failed response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            code: 1,
            message: message.into(),
        }
    }
}
