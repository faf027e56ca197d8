//! Cache and database health check.

use std::sync::Arc;

use tracing::{error, info};

use strata_core::bridge::dispatch;
use strata_core::result::AppResult;
use strata_core::traits::cache::CacheProvider;
use strata_database::repositories::HealthProbe;

/// Pings the cache and the database and describes the outcome.
#[derive(Clone)]
pub struct HealthService {
    cache: Arc<dyn CacheProvider>,
    database: Arc<dyn HealthProbe>,
}

impl HealthService {
    pub fn new(cache: Arc<dyn CacheProvider>, database: Arc<dyn HealthProbe>) -> Self {
        Self { cache, database }
    }

    /// Always returns a message; failures are described, not propagated.
    pub async fn health_check(&self) -> String {
        let cache = self.cache.clone();
        let cache_result = dispatch(async move { cache.health_check().await }).await;

        let database = self.database.clone();
        let database_result = dispatch(async move { database.ping().await }).await;

        let healthy = cache_result.is_ok() && database_result.is_ok();
        let message = format!(
            "{} {}",
            describe("Redis", &cache_result),
            describe("Db", &database_result)
        );

        if healthy {
            info!("{message}");
        } else {
            error!("{message}");
        }
        message
    }
}

fn describe(name: &str, result: &AppResult<()>) -> String {
    match result {
        Ok(()) => format!("{name} connection is healthy."),
        Err(e) => format!("{name} connection is unhealthy. Error: {}.", e.message),
    }
}
