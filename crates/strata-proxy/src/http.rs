//! Plain HTTP GET proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;
use validator::Validate;

use strata_core::config::proxy::ProxyConfig;
use strata_core::error::AppError;
use strata_core::result::AppResult;
use strata_core::validation::validate;

/// Input of [`SampleProxy::get_sample`].
#[derive(Debug, Clone, Validate)]
pub struct SampleProxyRequest {
    #[validate(range(min = 1))]
    pub id: i64,
    #[validate(length(min = 1))]
    pub sample_name: String,
}

/// Output of [`SampleProxy::get_sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleProxyResponse {
    pub id: i64,
    pub sample_name: String,
}

/// Fetches a sample from the configured third-party endpoint.
#[async_trait]
pub trait SampleProxy: Send + Sync + 'static {
    async fn get_sample(&self, request: &SampleProxyRequest) -> AppResult<SampleProxyResponse>;
}

/// [`SampleProxy`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSampleProxy {
    client: Client,
    url: Url,
}

impl HttpSampleProxy {
    /// Create the proxy from configuration.
    pub fn new(config: &ProxyConfig) -> AppResult<Self> {
        let url = Url::parse(&config.url).map_err(|e| {
            AppError::configuration(format!("Couldn't parse proxy url '{}': {e}", config.url))
        })?;
        let client = crate::build_client(Duration::from_secs(config.timeout_seconds))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl SampleProxy for HttpSampleProxy {
    async fn get_sample(&self, request: &SampleProxyRequest) -> AppResult<SampleProxyResponse> {
        validate(request)?;

        let response = self.client.get(self.url.clone()).send().await?;
        debug!(status = %response.status(), url = %self.url, "Proxy responded");
        let body = response.bytes().await?;

        let first = body
            .first()
            .copied()
            .ok_or_else(|| AppError::external_service("Proxy returned an empty body"))?;

        Ok(SampleProxyResponse {
            id: request.id,
            sample_name: format!("{}{}", request.sample_name, char::from(first)),
        })
    }
}
