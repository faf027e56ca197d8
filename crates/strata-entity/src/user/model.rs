//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row as read for authentication. The password hash is matched
/// in the query and never loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Disabled accounts cannot obtain tokens.
    pub is_active: bool,
    /// Programmatic accounts authenticate only through the programmatic flow.
    pub is_programmatic: bool,
}

impl User {
    /// Interactive login and refresh are allowed.
    pub fn can_login(&self) -> bool {
        self.is_active && !self.is_programmatic
    }

    /// Programmatic token issuance is allowed.
    pub fn can_login_programmatically(&self) -> bool {
        self.is_active && self.is_programmatic
    }

    /// Email, or an empty string when the column is null.
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}
