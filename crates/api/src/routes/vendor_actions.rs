//! Per-quotation staff actions: selection, negotiation, agreement, approval
//!
//! Each action mutates exactly one quotation row upstream and is terminal on
//! failure; the client reverts its optimistic update when these return an
//! error.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use procura_core::ports::NegotiationUpdate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::logging::log_operation;

fn require_pair(
    request_id: Option<String>,
    vendor_name: Option<String>,
    hint: &str,
) -> ApiResult<(String, String)> {
    match (request_id, vendor_name) {
        (Some(id), Some(vendor)) if !id.is_empty() && !vendor.is_empty() => Ok((id, vendor)),
        _ => Err(ApiError::validation(hint.to_string())),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionBody {
    pub request_id: Option<String>,
    pub vendor_name: Option<String>,
    pub is_selected: Option<bool>,
}

/// Toggle a quotation's `Selected` flag.
pub async fn update_vendor_selection(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<SelectionBody>,
) -> ApiResult<Json<Value>> {
    let hint = "Request ID, Vendor Name, and isSelected (boolean) are required";
    let (request_id, vendor_name) = require_pair(body.request_id, body.vendor_name, hint)?;
    let is_selected = body.is_selected.ok_or_else(|| ApiError::validation(hint))?;

    let started = Instant::now();
    let result = ctx.service.set_vendor_selection(&request_id, &vendor_name, is_selected).await;
    log_operation("vendor_actions::selection", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NegotiationBody {
    pub request_id: Option<String>,
    pub vendor_name: Option<String>,
    pub negotiation_notes: Option<String>,
    /// A number, a numeric string, or blank to clear the recorded amount.
    pub negotiated_amount: Option<Value>,
}

/// Record negotiation notes and the negotiated amount on one quotation.
pub async fn update_negotiation(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<NegotiationBody>,
) -> ApiResult<Json<Value>> {
    let hint = "Request ID and Vendor Name are required";
    let (request_id, vendor_name) = require_pair(body.request_id, body.vendor_name, hint)?;

    let negotiated_amount = match body.negotiated_amount {
        Some(Value::Number(n)) => n.as_f64().filter(|amount| *amount >= 0.0),
        Some(Value::String(raw)) => {
            let cleaned: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse::<f64>().ok().filter(|amount| *amount >= 0.0)
        }
        _ => None,
    };

    let update = NegotiationUpdate {
        request_id,
        vendor_name,
        negotiation_notes: body.negotiation_notes.unwrap_or_default(),
        negotiated_amount,
    };

    let started = Instant::now();
    let result = ctx.service.save_negotiation(&update).await;
    log_operation("vendor_actions::negotiation", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgreementBody {
    pub request_id: Option<String>,
    pub vendor_name: Option<String>,
    pub is_accepted: Option<bool>,
}

/// Record legal-agreement acceptance for one quotation.
pub async fn update_agreement(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<AgreementBody>,
) -> ApiResult<Json<Value>> {
    let hint = "Request ID, Vendor Name, and isAccepted (boolean) are required";
    let (request_id, vendor_name) = require_pair(body.request_id, body.vendor_name, hint)?;
    let is_accepted = body.is_accepted.ok_or_else(|| ApiError::validation(hint))?;

    let started = Instant::now();
    let result = ctx.service.set_agreement(&request_id, &vendor_name, is_accepted).await;
    log_operation("vendor_actions::agreement", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApprovalBody {
    pub request_id: Option<String>,
    pub vendor_name: Option<String>,
    pub is_approved: Option<bool>,
}

/// Mark a quotation's vendor approved (or withdraw the approval).
pub async fn update_vendor_approval(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ApprovalBody>,
) -> ApiResult<Json<Value>> {
    let hint = "Request ID, Vendor Name, and isApproved (boolean) are required";
    let (request_id, vendor_name) = require_pair(body.request_id, body.vendor_name, hint)?;
    let is_approved = body.is_approved.ok_or_else(|| ApiError::validation(hint))?;

    let started = Instant::now();
    let result = ctx.service.set_vendor_approval(&request_id, &vendor_name, is_approved).await;
    log_operation("vendor_actions::approval", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}
