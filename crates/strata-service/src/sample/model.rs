//! Sample service inputs and outputs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use strata_entity::message::SampleMessage;

#[derive(Debug, Clone, Validate)]
pub struct GetSampleModel {
    #[validate(range(min = 1))]
    pub id: i64,
    #[validate(length(min = 1))]
    pub sample_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSampleResponse {
    pub id: i64,
    pub sample_name: String,
}

#[derive(Debug, Clone, Validate)]
pub struct UpdateSampleModel {
    #[validate(range(min = 1))]
    pub sample_id: i64,
    #[validate(range(min = 1))]
    pub sample_status: i64,
    #[validate(length(min = 1))]
    pub modified_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSampleResponse {
    pub is_successful: bool,
}

/// Publishes `count` copies of `message`.
#[derive(Debug, Clone, Validate)]
pub struct PublishModel {
    #[validate(range(min = 1, max = 50))]
    pub count: usize,
    #[validate(nested)]
    pub message: SampleMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishResponse {
    pub is_successful: bool,
    pub message_ids: Vec<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct PostSampleXmlModel {
    #[validate(length(min = 1))]
    pub sample_name: String,
    #[validate(length(min = 1))]
    pub sample_type: String,
    pub sample_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostSampleXmlResponse {
    pub is_success: bool,
    pub message: String,
}
