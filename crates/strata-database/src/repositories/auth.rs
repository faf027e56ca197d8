//! User credential and refresh-token repository.

use async_trait::async_trait;
use sqlx::PgPool;

use strata_core::error::{AppError, ErrorKind};
use strata_core::result::AppResult;
use strata_entity::user::{NewRefreshToken, User};

/// Lookups and writes needed by the authentication flows.
#[async_trait]
pub trait AuthStore: Send + Sync + 'static {
    /// Find a user by username and SHA-256 password hash.
    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>>;

    /// Find the owner of a refresh token that has not expired yet.
    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<User>>;

    /// Store a refresh token valid for the configured number of days.
    async fn add_refresh_token(&self, token: &NewRefreshToken) -> AppResult<()>;
}

/// PostgreSQL-backed [`AuthStore`].
#[derive(Debug, Clone)]
pub struct AuthRepository {
    pool: PgPool,
    refresh_token_ttl_days: i32,
}

impl AuthRepository {
    /// Create a new auth repository.
    pub fn new(pool: PgPool, refresh_token_ttl_days: i32) -> Self {
        Self {
            pool,
            refresh_token_ttl_days,
        }
    }
}

#[async_trait]
impl AuthStore for AuthRepository {
    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, is_active, is_programmatic \
             FROM users WHERE username = $1 AND password_hash = $2",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by credentials", e)
        })
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.is_active, u.is_programmatic \
             FROM users AS u \
             INNER JOIN users_refresh_tokens AS ur ON u.id = ur.user_id \
             WHERE ur.refresh_token = $1 AND ur.expiry_date > now() \
             LIMIT 1",
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by refresh token", e)
        })
    }

    async fn add_refresh_token(&self, token: &NewRefreshToken) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO users_refresh_tokens (user_id, refresh_token, expiry_date) \
             VALUES ($1, $2, current_timestamp + make_interval(days => $3))",
        )
        .bind(token.user_id)
        .bind(&token.refresh_token)
        .bind(self.refresh_token_ttl_days)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add refresh token", e))?;

        if result.rows_affected() != 1 {
            return Err(AppError::database(format!(
                "Refresh token insert affected {} rows",
                result.rows_affected()
            )));
        }
        Ok(())
    }
}
