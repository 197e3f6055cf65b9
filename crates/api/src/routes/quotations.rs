//! Quotation fetch and vendor submission

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use procura_domain::QuotationSubmission;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::logging::log_operation;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationsQuery {
    pub request_id: Option<String>,
}

/// Normalized quotation rows for one request.
pub async fn fetch_quotations(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<QuotationsQuery>,
) -> ApiResult<Json<Value>> {
    let request_id = query
        .request_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("Request ID is required"))?;

    let started = Instant::now();
    let result = ctx.service.quotations(&request_id).await;
    log_operation("quotations::fetch", started.elapsed(), &result);

    let quotations = result?;
    Ok(Json(json!({"success": true, "quotations": quotations})))
}

/// A vendor's quote for one request.
pub async fn submit_quotation(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<QuotationSubmission>,
) -> ApiResult<Json<Value>> {
    let required = [
        &body.request_id,
        &body.vendor_name,
        &body.vendor_email,
        &body.unit_price,
        &body.total_price,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::validation(
            "Request ID, vendor name, vendor email, unit price, and total price are required",
        ));
    }

    let started = Instant::now();
    let result = ctx.service.submit_quotation(&body).await;
    log_operation("quotations::submit", started.elapsed(), &result);

    let message = result?;
    Ok(Json(json!({"success": true, "message": message})))
}
