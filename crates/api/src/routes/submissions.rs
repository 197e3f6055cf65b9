//! Submission listing

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::logging::log_operation;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionsQuery {
    /// Restrict to the procurement team's working set, newest first.
    pub pipeline: bool,
}

/// List submission rows.
pub async fn fetch_submissions(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<SubmissionsQuery>,
) -> ApiResult<Json<Value>> {
    let started = Instant::now();
    let result = if query.pipeline {
        ctx.service.pipeline_submissions().await
    } else {
        ctx.service.list_submissions().await
    };
    log_operation("submissions::fetch", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}
