//! Messages delivered by a subscription.

use std::collections::HashMap;

/// A message pulled from a subscription, with its data already decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Broker-assigned id, stable across redeliveries.
    pub message_id: String,
    /// Handle used to acknowledge this delivery.
    pub ack_id: String,
    /// Raw payload.
    pub data: Vec<u8>,
    /// Message attributes.
    pub attributes: HashMap<String, String>,
}

impl ReceivedMessage {
    /// Payload as text, for logging.
    pub fn data_lossy(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}
