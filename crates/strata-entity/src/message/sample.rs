//! Sample status-change message.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Attribute key attached to every published sample message.
pub const DUMMY_ATTRIBUTE: &str = "dummy_attribute";

/// Default value of [`DUMMY_ATTRIBUTE`].
pub const DUMMY_ATTRIBUTE_VALUE: &str = "dummy_attribute_value";

/// JSON payload published to and received from the sample topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct SampleMessage {
    #[validate(range(min = 1))]
    pub sample_id: i64,
    #[validate(range(min = 1))]
    pub sample_status: i64,
    #[validate(length(min = 1))]
    pub modified_by: String,
}
