//! Intake form submission

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use procura_domain::IntakeForm;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::logging::log_operation;

/// Create a new procurement request.
///
/// Whatever stage the client sent is discarded; every intake starts at
/// `Intake`. The generated request id comes back from the scripting
/// endpoint.
pub async fn submit_intake(
    State(ctx): State<Arc<AppContext>>,
    Json(form): Json<IntakeForm>,
) -> ApiResult<Json<Value>> {
    let started = Instant::now();
    let result = ctx.service.submit_intake(&form).await;
    log_operation("intake::submit", started.elapsed(), &result);

    let receipt = result?;
    Ok(Json(json!({
        "success": true,
        "data": receipt.data,
        "requestId": receipt.request_id,
        "customerId": receipt.customer_id,
    })))
}
