//! Purchase order dispatch

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use procura_core::normalize::coerce_price;
use procura_domain::constants::DEFAULT_PO_QUANTITY;
use procura_domain::PurchaseOrderDraft;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::utils::logging::log_operation;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseOrderBody {
    pub request_id: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_email: Option<String>,
    pub po_number: Option<String>,
    pub po_date: Option<String>,
    pub item_name: Option<String>,
    /// The sheet stores quantity as text, so both numbers and numeric
    /// strings arrive here.
    pub quantity: Option<Value>,
    pub unit_price: Option<Value>,
    pub total_price: Option<Value>,
    pub requester_email: Option<String>,
    pub requester_name: Option<String>,
    pub department: Option<String>,
}

/// Email the purchase order to the vendor and mark the quotation row.
pub async fn send_purchase_order(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<PurchaseOrderBody>,
) -> ApiResult<Json<Value>> {
    let hint = "Request ID, Vendor Name, and Vendor Email are required";
    let (request_id, vendor_name, vendor_email) =
        match (body.request_id, body.vendor_name, body.vendor_email) {
            (Some(id), Some(vendor), Some(email))
                if !id.is_empty() && !vendor.is_empty() && !email.is_empty() =>
            {
                (id, vendor, email)
            }
            _ => return Err(ApiError::validation(hint)),
        };

    let draft = PurchaseOrderDraft {
        request_id,
        vendor_name,
        vendor_email,
        po_number: body.po_number.unwrap_or_default(),
        po_date: body.po_date.unwrap_or_default(),
        item_name: body.item_name.unwrap_or_default(),
        quantity: body.quantity.map(coerce_quantity).unwrap_or(DEFAULT_PO_QUANTITY),
        unit_price: body.unit_price.as_ref().map(coerce_price).unwrap_or(0.0),
        total_price: body.total_price.as_ref().map(coerce_price).unwrap_or(0.0),
        requester_email: body.requester_email.unwrap_or_default(),
        requester_name: body.requester_name.unwrap_or_default(),
        department: body.department.unwrap_or_default(),
    };

    let started = Instant::now();
    let result = ctx.service.send_purchase_order(&draft).await;
    log_operation("purchase_order::send", started.elapsed(), &result);

    let data = result?;
    Ok(Json(json!({"success": true, "data": data})))
}

fn coerce_quantity(value: Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().map(|q| q as u32).unwrap_or(DEFAULT_PO_QUANTITY),
        Value::String(s) => s.trim().parse().unwrap_or(DEFAULT_PO_QUANTITY),
        _ => DEFAULT_PO_QUANTITY,
    }
}
