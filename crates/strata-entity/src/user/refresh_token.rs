//! Refresh token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored refresh token. Expiry is assigned by the database on insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Owning user.
    pub user_id: i64,
    /// Opaque token value (UUIDv4 text).
    pub refresh_token: String,
    /// Tokens past this instant are ignored.
    pub expiry_date: DateTime<Utc>,
}

/// Data required to store a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRefreshToken {
    /// Owning user.
    pub user_id: i64,
    /// Opaque token value.
    pub refresh_token: String,
}
