//! Pub/Sub publisher and receiver configuration.

use serde::{Deserialize, Serialize};

/// Google Cloud Pub/Sub settings shared by the publisher and receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubConfig {
    /// Whether publishing is wired at all.
    #[serde(default)]
    pub enabled: bool,
    /// REST endpoint, e.g. `https://pubsub.googleapis.com` or an emulator.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// OAuth bearer token. The emulator runs without one.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Publisher settings.
    #[serde(default)]
    pub publisher: PublisherConfig,
    /// Receiver settings.
    #[serde(default)]
    pub receiver: ReceiverConfig,
}

impl Default for PubSubConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            access_token: None,
            publisher: PublisherConfig::default(),
            receiver: ReceiverConfig::default(),
        }
    }
}

/// Sample topic publisher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// GCP project id.
    #[serde(default)]
    pub project_id: String,
    /// Topic id.
    #[serde(default)]
    pub topic_id: String,
    /// Publish timeout in seconds (0 means the default of 5).
    #[serde(default)]
    pub timeout_seconds: u64,
}

/// Sample subscription receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Whether the receiver loops are started.
    #[serde(default)]
    pub enabled: bool,
    /// GCP project id.
    #[serde(default)]
    pub project_id: String,
    /// Subscription id.
    #[serde(default)]
    pub subscription_id: String,
    /// Number of independent pull loops.
    #[serde(default = "default_receiver_count")]
    pub count: usize,
    /// Maximum messages returned by a single pull.
    #[serde(default = "default_max_messages")]
    pub max_messages: u32,
    /// Delay before a failed pull loop is restarted, in milliseconds.
    #[serde(default = "default_restart_delay")]
    pub restart_delay_ms: u64,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            project_id: String::new(),
            subscription_id: String::new(),
            count: default_receiver_count(),
            max_messages: default_max_messages(),
            restart_delay_ms: default_restart_delay(),
        }
    }
}

fn default_endpoint() -> String {
    "https://pubsub.googleapis.com".to_string()
}

fn default_receiver_count() -> usize {
    1
}

fn default_max_messages() -> u32 {
    10
}

fn default_restart_delay() -> u64 {
    1000
}
