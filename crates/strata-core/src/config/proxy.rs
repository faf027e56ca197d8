//! Outbound proxy configuration.

use serde::{Deserialize, Serialize};

/// Targets for the plain HTTP and SOAP/XML sample proxies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Target of the plain GET proxy.
    pub url: String,
    /// Target of the SOAP proxy. Falls back to `url` when absent.
    #[serde(default)]
    pub xml_url: Option<String>,
    /// `SOAPAction` header sent with SOAP requests.
    #[serde(default = "default_soap_action")]
    pub soap_action: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ProxyConfig {
    /// The effective SOAP endpoint.
    pub fn soap_url(&self) -> &str {
        self.xml_url.as_deref().unwrap_or(&self.url)
    }
}

fn default_soap_action() -> String {
    "http://sample.org/someAction".to_string()
}

fn default_timeout() -> u64 {
    5
}
