//! Pub/Sub REST client.

use std::collections::HashMap;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use strata_core::error::{AppError, ErrorKind};
use strata_core::result::AppResult;

use crate::message::ReceivedMessage;

/// Long-poll budget for a single pull request.
const PULL_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Serialize)]
struct PublishRequest<'a> {
    messages: [OutgoingMessage<'a>; 1],
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    data: String,
    attributes: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PullRequest {
    max_messages: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullResponse {
    #[serde(default)]
    received_messages: Vec<WireReceivedMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReceivedMessage {
    ack_id: String,
    message: WireMessage,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    #[serde(default)]
    data: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
    message_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcknowledgeRequest<'a> {
    ack_ids: &'a [String],
}

/// Minimal client for the Pub/Sub REST surface Strata uses.
#[derive(Debug, Clone)]
pub struct PubSubClient {
    http: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl PubSubClient {
    /// Create a client for `endpoint`; `access_token` is sent as a bearer token.
    pub fn new(endpoint: &str, access_token: Option<String>) -> AppResult<Self> {
        let http = Client::builder().build().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build Pub/Sub client: {e}"),
                e,
            )
        })?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let builder = self.http.post(format!("{}/v1/{path}", self.endpoint));
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Publish one message and return the id assigned by the broker.
    pub async fn publish(
        &self,
        project_id: &str,
        topic_id: &str,
        data: &[u8],
        attributes: &HashMap<String, String>,
        timeout: Duration,
    ) -> AppResult<String> {
        let body = PublishRequest {
            messages: [OutgoingMessage {
                data: STANDARD.encode(data),
                attributes,
            }],
        };

        let response: PublishResponse = self
            .post(&format!("projects/{project_id}/topics/{topic_id}:publish"))
            .timeout(timeout)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .message_ids
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("Publish response carried no message id"))
    }

    /// Pull up to `max_messages` messages.
    pub async fn pull(
        &self,
        project_id: &str,
        subscription_id: &str,
        max_messages: u32,
    ) -> AppResult<Vec<ReceivedMessage>> {
        let response: PullResponse = self
            .post(&format!(
                "projects/{project_id}/subscriptions/{subscription_id}:pull"
            ))
            .timeout(PULL_TIMEOUT)
            .json(&PullRequest { max_messages })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut messages = Vec::with_capacity(response.received_messages.len());
        let mut undecodable = Vec::new();
        for received in response.received_messages {
            match STANDARD.decode(&received.message.data) {
                Ok(data) => messages.push(ReceivedMessage {
                    message_id: received.message.message_id,
                    ack_id: received.ack_id,
                    data,
                    attributes: received.message.attributes,
                }),
                Err(e) => {
                    error!(
                        message_id = %received.message.message_id,
                        "Message {} carries invalid base64 data and is dropped: {e}",
                        received.message.message_id
                    );
                    undecodable.push(received.ack_id);
                }
            }
        }

        if undecodable.is_empty() {
            return Ok(messages);
        }

        // Redelivery cannot fix the payload, so these are acknowledged here.
        if let Err(e) = self
            .acknowledge(project_id, subscription_id, &undecodable)
            .await
        {
            warn!(error = %e, "Failed to acknowledge undecodable messages");
        }
        Ok(messages)
    }

    /// Acknowledge deliveries so the broker stops redelivering them.
    pub async fn acknowledge(
        &self,
        project_id: &str,
        subscription_id: &str,
        ack_ids: &[String],
    ) -> AppResult<()> {
        self.post(&format!(
            "projects/{project_id}/subscriptions/{subscription_id}:acknowledge"
        ))
        .json(&AcknowledgeRequest { ack_ids })
        .send()
        .await?
        .error_for_status()?;
        Ok(())
    }
}
