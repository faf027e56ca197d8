//! Turns received sample messages into sample updates.

use async_trait::async_trait;

use strata_core::bridge::dispatch;
use strata_core::error::AppError;
use strata_core::result::AppResult;
use strata_core::validation::validate;
use strata_entity::message::SampleMessage;
use strata_messaging::{MessageHandler, ReceivedMessage};

use super::model::UpdateSampleModel;
use super::service::SampleService;

/// [`MessageHandler`] for the sample subscription.
#[derive(Clone)]
pub struct SampleReceiverHandler {
    service: SampleService,
}

impl SampleReceiverHandler {
    pub fn new(service: SampleService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MessageHandler for SampleReceiverHandler {
    async fn handle(&self, message: ReceivedMessage) -> AppResult<()> {
        if message.message_id.is_empty() {
            return Err(AppError::validation("message id is required"));
        }
        if message.data.is_empty() {
            return Err(AppError::validation("message data is required"));
        }

        let payload: SampleMessage = serde_json::from_slice(&message.data)?;
        validate(&payload)?;

        let service = self.service.clone();
        dispatch(async move {
            service
                .update_sample(UpdateSampleModel {
                    sample_id: payload.sample_id,
                    sample_status: payload.sample_status,
                    modified_by: payload.modified_by,
                })
                .await
        })
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use strata_core::error::ErrorKind;

    use super::super::service::fakes::{cache, service};
    use super::*;

    fn handler() -> SampleReceiverHandler {
        SampleReceiverHandler::new(service(Arc::default(), cache()))
    }

    fn received(id: &str, data: &str) -> ReceivedMessage {
        ReceivedMessage {
            message_id: id.into(),
            ack_id: format!("ack-{id}"),
            data: data.as_bytes().to_vec(),
            attributes: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_valid_message_updates_sample() {
        let data = r#"{"SampleId":4,"SampleStatus":2,"ModifiedBy":"publisher"}"#;
        handler().handle(received("m-1", data)).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_envelope_is_rejected() {
        let err = handler().handle(received("", "{}")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = handler().handle(received("m-2", "")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_rejected() {
        let err = handler()
            .handle(received("m-3", "not json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected() {
        let data = r#"{"SampleId":0,"SampleStatus":2,"ModifiedBy":"publisher"}"#;
        let err = handler().handle(received("m-4", data)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
