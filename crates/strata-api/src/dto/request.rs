//! Request DTOs. Field names are PascalCase on the wire.

use serde::Deserialize;

use strata_entity::message::SampleMessage;
use strata_service::auth::{LoginModel, ProgrammaticModel, RefreshModel};
use strata_service::sample::{PostSampleXmlModel, PublishModel};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginRequest> for LoginModel {
    fn from(req: LoginRequest) -> Self {
        Self {
            user_name: req.user_name,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

impl From<RefreshRequest> for RefreshModel {
    fn from(req: RefreshRequest) -> Self {
        Self {
            refresh_token: req.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgrammaticRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub expiry_days: i32,
}

impl From<ProgrammaticRequest> for ProgrammaticModel {
    fn from(req: ProgrammaticRequest) -> Self {
        Self {
            user_name: req.user_name,
            password: req.password,
            expiry_days: req.expiry_days,
        }
    }
}

/// Paging parameters of the sample listing; both optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_size: Option<String>,
    pub page_index: Option<String>,
}

impl PageQuery {
    pub fn describe(&self, version: &str) -> String {
        fn or_empty(value: &Option<String>) -> &str {
            value.as_deref().filter(|v| !v.is_empty()).unwrap_or("Empty")
        }
        format!(
            "Sample {version} with PageSize:{} and PageIndex:{}",
            or_empty(&self.page_size),
            or_empty(&self.page_index)
        )
    }
}

/// Body of `POST /v1/sample`; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddSampleRequest {
    pub sample_name: Option<String>,
    pub sample_type: Option<String>,
    pub sample_code: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSampleRequest {
    #[serde(default)]
    pub sample_status: i64,
    #[serde(default)]
    pub modified_by: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishRequest {
    #[serde(default)]
    pub count: usize,
    pub message: SampleMessage,
}

impl From<PublishRequest> for PublishModel {
    fn from(req: PublishRequest) -> Self {
        Self {
            count: req.count,
            message: req.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostSampleXmlRequest {
    #[serde(default)]
    pub sample_name: String,
    #[serde(default)]
    pub sample_type: String,
    pub sample_code: Option<i32>,
}

impl From<PostSampleXmlRequest> for PostSampleXmlModel {
    fn from(req: PostSampleXmlRequest) -> Self {
        Self {
            sample_name: req.sample_name,
            sample_type: req.sample_type,
            sample_code: req.sample_code,
        }
    }
}
