//! Purchase order types

use serde::{Deserialize, Serialize};

/// A drafted purchase order, synthesized from a submission and the approved
/// quotation. This is what gets rendered as the PO document and forwarded to
/// the scripting endpoint when staff send it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseOrderDraft {
    pub request_id: String,
    pub vendor_name: String,
    pub vendor_email: String,
    pub po_number: String,
    pub po_date: String,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub requester_email: String,
    pub requester_name: String,
    pub department: String,
}
