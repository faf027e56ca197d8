//! Database liveness probe.

use async_trait::async_trait;
use sqlx::PgPool;

use strata_core::result::AppResult;

/// Anything that can report whether its backing store is reachable.
#[async_trait]
pub trait HealthProbe: Send + Sync + 'static {
    async fn ping(&self) -> AppResult<()>;
}

/// Pings PostgreSQL through the shared pool.
#[derive(Debug, Clone)]
pub struct HealthRepository {
    pool: PgPool,
}

impl HealthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for HealthRepository {
    async fn ping(&self) -> AppResult<()> {
        crate::connection::ping(&self.pool).await
    }
}
