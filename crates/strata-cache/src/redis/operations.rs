//! Redis cache provider implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use strata_core::error::{AppError, ErrorKind};
use strata_core::result::AppResult;
use strata_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider. Every command is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
    timeout: Duration,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    async fn bounded<T>(
        &self,
        command: impl Future<Output = redis::RedisResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, command).await {
            Ok(result) => result.map_err(Self::map_err),
            Err(_) => Err(AppError::timeout(format!(
                "Redis command timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded(conn.get::<_, Option<String>>(&full_key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let millis = ttl.as_millis().max(1) as u64;
        self.bounded(conn.pset_ex::<_, _, ()>(&full_key, value, millis))
            .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded(conn.del::<_, ()>(&full_key)).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded(conn.exists::<_, bool>(&full_key)).await
    }

    async fn health_check(&self) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        let pong: String = self
            .bounded(redis::cmd("PING").query_async(&mut conn))
            .await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(AppError::cache(format!("Unexpected PING reply: {pong}")))
        }
    }
}
