//! Sample handlers, version 1.

use axum::extract::{Query, State};

use strata_service::sample::{
    GetSampleModel, GetSampleResponse, PostSampleXmlResponse, PublishResponse, UpdateSampleModel,
    UpdateSampleResponse,
};

use super::{ApiResult, ok};
use crate::dto::request::{
    AddSampleRequest, PageQuery, PostSampleXmlRequest, PublishRequest, UpdateSampleRequest,
};
use crate::extractors::{ApiJson, ApiPath};
use crate::state::AppState;

/// GET /api/v1/sample
pub async fn list(Query(query): Query<PageQuery>) -> ApiResult<String> {
    ok(query.describe("v1"))
}

/// POST /api/v1/sample
pub async fn add(ApiJson(_req): ApiJson<AddSampleRequest>) -> ApiResult<&'static str> {
    ok("Sample is created successfully.")
}

/// PUT /api/v1/sample/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateSampleRequest>,
) -> ApiResult<UpdateSampleResponse> {
    let model = UpdateSampleModel {
        sample_id: id,
        sample_status: req.sample_status,
        modified_by: req.modified_by,
    };
    ok(state.sample_service.update_sample(model).await?)
}

/// GET /api/v1/sample/proxy
pub async fn proxy(State(state): State<AppState>) -> ApiResult<GetSampleResponse> {
    let model = GetSampleModel {
        id: 8,
        sample_name: "Trying some proxy requests..".to_string(),
    };
    ok(state.sample_service.get_proxy(model).await?)
}

/// GET /api/v1/sample/database
pub async fn database(State(state): State<AppState>) -> ApiResult<GetSampleResponse> {
    let model = GetSampleModel {
        id: 7,
        sample_name: "Trying some database requests..".to_string(),
    };
    ok(state.sample_service.get_database(model).await?)
}

/// GET /api/v1/sample/cache
pub async fn cache(State(state): State<AppState>) -> ApiResult<GetSampleResponse> {
    let model = GetSampleModel {
        id: 1,
        sample_name: "Trying some cache requests..".to_string(),
    };
    ok(state.sample_service.get_cache(model).await?)
}

/// POST /api/v1/sample/pub-sub
pub async fn publish(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PublishRequest>,
) -> ApiResult<PublishResponse> {
    ok(state.sample_service.publish_message(req.into()).await?)
}

/// POST /api/v1/sample/xml
pub async fn post_xml(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PostSampleXmlRequest>,
) -> ApiResult<PostSampleXmlResponse> {
    ok(state.sample_service.post_sample_xml(req.into()).await?)
}
