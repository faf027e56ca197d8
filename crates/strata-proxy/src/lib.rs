//! # strata-proxy
//!
//! Outbound calls to third-party HTTP services: a plain GET proxy and a
//! SOAP/XML proxy. Both are exposed through traits so services can be
//! tested against fakes.

pub mod http;
pub mod soap;

pub use http::{HttpSampleProxy, SampleProxy, SampleProxyRequest, SampleProxyResponse};
pub use soap::{HttpSampleXmlProxy, SampleXmlProxy, SampleXmlRequest, SampleXmlResponse};

use std::time::Duration;

use strata_core::error::{AppError, ErrorKind};
use strata_core::result::AppResult;

/// Build a client whose every request is bounded by `timeout`.
pub(crate) fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build HTTP client: {e}"),
                e,
            )
        })
}
