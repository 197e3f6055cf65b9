//! Per-request progress view
//!
//! The centralized stage derivation both audiences read: same rules, two
//! orderings, selected by the `view` parameter.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use procura_core::{approved_vendor_names, selected_vendor_names};
use procura_domain::StageView;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::logging::log_operation;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackQuery {
    pub request_id: Option<String>,
    pub view: Option<StageView>,
}

/// The assembled tracking snapshot for one request.
pub async fn track(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<TrackQuery>,
) -> ApiResult<Json<Value>> {
    let request_id = query
        .request_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("Request ID is required"))?;
    let view = query.view.unwrap_or_default();

    let started = Instant::now();
    let result = ctx.service.track(&request_id, view).await;
    log_operation("tracking::snapshot", started.elapsed(), &result);

    let snapshot = result?;
    Ok(Json(json!({
        "success": true,
        "submission": snapshot.submission,
        "view": snapshot.view,
        "stages": snapshot.stages,
        "quotations": snapshot.quotations,
        "vendorsSentQuotes": snapshot.vendors_sent_quotes,
        "selectedVendors": selected_vendor_names(&snapshot.quotations),
        "approvedVendors": approved_vendor_names(&snapshot.quotations),
        "rejected": snapshot.rejected,
        "purchaseOrder": snapshot.purchase_order,
    })))
}
