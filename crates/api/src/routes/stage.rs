//! Stage updates

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use procura_core::ports::StageUpdate;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::logging::log_operation;

/// Move a request to a different stage.
///
/// Accepts `requestId` or the legacy `id`; optional `sourcingType`,
/// `vendor`, and `notes` pass through to the sheet untouched.
pub async fn update_stage(
    State(ctx): State<Arc<AppContext>>,
    Json(update): Json<StageUpdate>,
) -> ApiResult<Json<Value>> {
    let started = Instant::now();
    let result = ctx.service.update_stage(&update).await;
    log_operation("stage::update", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}
