//! Vendor lookups and quote-request dispatch

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use procura_core::group_by_tier;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::logging::log_operation;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorsQuery {
    pub item_name: Option<String>,
}

/// List vendors, filtered by item name when given, grouped by tier for the
/// sourcing view.
pub async fn fetch_vendors(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<VendorsQuery>,
) -> ApiResult<Json<Value>> {
    let started = Instant::now();
    let result = ctx.service.vendors_for_item(query.item_name.as_deref()).await;
    log_operation("vendors::fetch", started.elapsed(), &result);

    let vendors = result?;
    let tiers = group_by_tier(&vendors);
    Ok(Json(json!({"success": true, "vendors": vendors, "tiers": tiers})))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorHistoryQuery {
    pub vendor_name: Option<String>,
}

/// Free-form history rows for one vendor.
pub async fn fetch_vendor_history(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<VendorHistoryQuery>,
) -> ApiResult<Json<Value>> {
    let vendor_name = query
        .vendor_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::validation("Vendor Name is required"))?;

    let started = Instant::now();
    let result = ctx.service.vendor_history(&vendor_name).await;
    log_operation("vendors::history", started.elapsed(), &result);

    let history = result?;
    Ok(Json(json!({"success": true, "history": history})))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorsSentQuotesQuery {
    pub request_id: Option<String>,
}

/// Vendors a quote-request email went out to for one request.
pub async fn fetch_vendors_sent_quotes(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<VendorsSentQuotesQuery>,
) -> ApiResult<Json<Value>> {
    let request_id = query
        .request_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("Request ID is required"))?;

    let started = Instant::now();
    let result = ctx.service.vendors_sent_quotes(&request_id).await;
    log_operation("vendors::sent_quotes", started.elapsed(), &result);

    let vendors = result?;
    Ok(Json(json!({"success": true, "count": vendors.len(), "vendors": vendors})))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequestsBody {
    pub request_id: Option<String>,
    pub vendors: Option<Vec<String>>,
}

/// Send quote-request emails to the chosen vendors.
pub async fn send_quote_requests(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<QuoteRequestsBody>,
) -> ApiResult<Json<Value>> {
    let request_id = body
        .request_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("Request ID and vendors array are required"))?;
    let vendors = body
        .vendors
        .filter(|vendors| !vendors.is_empty())
        .ok_or_else(|| ApiError::validation("Request ID and vendors array are required"))?;

    let started = Instant::now();
    let result = ctx.service.send_quote_requests(&request_id, &vendors).await;
    log_operation("vendors::send_quote_requests", started.elapsed(), &result);

    let receipt = result?;
    Ok(Json(json!({
        "success": true,
        "sentCount": receipt.sent_count,
        "message": receipt.message,
    })))
}
