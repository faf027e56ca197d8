//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;
pub mod proxy;
pub mod pubsub;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::cache::CacheConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::proxy::ProxyConfig;
use self::pubsub::PubSubConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Outbound proxy settings.
    pub proxy: ProxyConfig,
    /// Pub/Sub settings.
    #[serde(default)]
    pub pubsub: PubSubConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `STRATA__`.
    pub fn load(env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STRATA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }

        let urls = [
            ("proxy.url", self.proxy.url.as_str()),
            ("proxy.xml_url", self.proxy.soap_url()),
        ];
        for (field, url) in urls {
            reqwest::Url::parse(url).map_err(|e| {
                AppError::configuration(format!("Couldn't parse {field} '{url}' as a URL: {e}"))
            })?;
        }

        if self.proxy.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "proxy.timeout_seconds must be greater than zero",
            ));
        }

        match self.cache.provider.as_str() {
            "memory" | "redis" => {}
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider '{other}'"
                )));
            }
        }

        if self.pubsub.enabled {
            let publisher = &self.pubsub.publisher;
            if publisher.project_id.is_empty() || publisher.topic_id.is_empty() {
                return Err(AppError::configuration(
                    "pubsub.publisher.project_id and topic_id must be set",
                ));
            }
        }

        if self.pubsub.receiver.enabled {
            let receiver = &self.pubsub.receiver;
            if receiver.project_id.is_empty() || receiver.subscription_id.is_empty() {
                return Err(AppError::configuration(
                    "pubsub.receiver.project_id and subscription_id must be set",
                ));
            }
            if receiver.count == 0 {
                return Err(AppError::configuration(
                    "pubsub.receiver.count must be greater than zero",
                ));
            }
        }

        Ok(())
    }
}
