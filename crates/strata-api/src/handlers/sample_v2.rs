//! Sample handlers, version 2.

use axum::extract::Query;

use super::{ApiResult, ok};
use crate::dto::request::PageQuery;

/// GET /api/v2/sample
pub async fn list(Query(query): Query<PageQuery>) -> ApiResult<String> {
    ok(query.describe("v2"))
}
