//! Sample repository.

use async_trait::async_trait;
use sqlx::PgPool;

use strata_core::result::AppResult;
use strata_entity::sample::SampleRecord;

/// Source of sample records.
#[async_trait]
pub trait SampleStore: Send + Sync + 'static {
    /// Fetch the sample record after confirming the database answers.
    async fn get_sample(&self) -> AppResult<SampleRecord>;
}

/// PostgreSQL-backed [`SampleStore`].
#[derive(Debug, Clone)]
pub struct SampleRepository {
    pool: PgPool,
}

impl SampleRepository {
    /// Create a new sample repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SampleStore for SampleRepository {
    async fn get_sample(&self) -> AppResult<SampleRecord> {
        crate::connection::ping(&self.pool).await?;
        Ok(SampleRecord {
            id: 1,
            sample_name: "sample name here!!".to_string(),
        })
    }
}
