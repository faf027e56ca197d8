//! Cache key builders for all Strata cache entries.

/// Key of the cached sample response served by the cache demo endpoint.
pub const DUMMY_CACHE_KEY: &str = "dummy_cache_key";

/// Prefix of the receiver's processed-message markers.
const RECEIVER_MESSAGE_PREFIX: &str = "sample-receiver-message-id";

/// Marker recording that a received message was processed.
pub fn sample_receiver_message(message_id: &str) -> String {
    format!("{RECEIVER_MESSAGE_PREFIX}:{message_id}")
}
