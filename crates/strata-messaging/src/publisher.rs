//! Sample message publisher.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use strata_core::config::pubsub::PublisherConfig;
use strata_core::error::AppError;
use strata_core::result::AppResult;
use strata_core::validation::validate;
use strata_entity::message::{DUMMY_ATTRIBUTE, DUMMY_ATTRIBUTE_VALUE, SampleMessage};

use crate::client::PubSubClient;

const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Publishes [`SampleMessage`]s to the sample topic.
#[async_trait]
pub trait SamplePublisher: Send + Sync + 'static {
    /// Publish one message. `attribute_overrides` replace or extend the
    /// default attributes for this message only. Returns the message id.
    async fn publish(
        &self,
        message: &SampleMessage,
        attribute_overrides: &HashMap<String, String>,
    ) -> AppResult<String>;
}

/// [`SamplePublisher`] backed by the Pub/Sub REST API.
#[derive(Debug, Clone)]
pub struct PubSubSamplePublisher {
    client: PubSubClient,
    project_id: String,
    topic_id: String,
    timeout: Duration,
    default_attributes: HashMap<String, String>,
}

impl PubSubSamplePublisher {
    pub fn new(client: PubSubClient, config: &PublisherConfig) -> Self {
        let timeout = match config.timeout_seconds {
            0 => DEFAULT_PUBLISH_TIMEOUT,
            secs => Duration::from_secs(secs),
        };
        Self {
            client,
            project_id: config.project_id.clone(),
            topic_id: config.topic_id.clone(),
            timeout,
            default_attributes: HashMap::from([(
                DUMMY_ATTRIBUTE.to_string(),
                DUMMY_ATTRIBUTE_VALUE.to_string(),
            )]),
        }
    }

    /// Defaults overlaid with `overrides`.
    pub fn merged_attributes(
        &self,
        overrides: &HashMap<String, String>,
    ) -> HashMap<String, String> {
        let mut attributes = self.default_attributes.clone();
        attributes.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        attributes
    }
}

#[async_trait]
impl SamplePublisher for PubSubSamplePublisher {
    async fn publish(
        &self,
        message: &SampleMessage,
        attribute_overrides: &HashMap<String, String>,
    ) -> AppResult<String> {
        validate(message)?;

        let data = serde_json::to_vec(message)?;
        let attributes = self.merged_attributes(attribute_overrides);

        let result = self
            .client
            .publish(&self.project_id, &self.topic_id, &data, &attributes, self.timeout)
            .await;

        match &result {
            Ok(message_id) => info!(
                message_id = %message_id,
                project_id = %self.project_id,
                topic_id = %self.topic_id,
                "{message_id} ID message is published successfully."
            ),
            Err(e) => error!(
                project_id = %self.project_id,
                topic_id = %self.topic_id,
                error = %e,
                "Failed to publish message"
            ),
        }
        result
    }
}

/// Stand-in used when publishing is switched off in configuration.
#[derive(Debug, Clone, Default)]
pub struct DisabledPublisher;

#[async_trait]
impl SamplePublisher for DisabledPublisher {
    async fn publish(
        &self,
        _message: &SampleMessage,
        _attribute_overrides: &HashMap<String, String>,
    ) -> AppResult<String> {
        Err(AppError::service_unavailable("Pub/Sub publishing is disabled"))
    }
}
