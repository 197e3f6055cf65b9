//! Port interfaces for the procurement workflow
//!
//! These traits define the boundaries between core business logic and
//! infrastructure implementations (the scripting-endpoint client and the
//! sent-quotes cache).

use async_trait::async_trait;
use procura_domain::{
    IntakeForm, PurchaseOrderDraft, Quotation, QuotationSubmission, Result, Submission, Vendor,
    VendorHistoryRecord,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the scripting endpoint reports back for a new intake.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeReceipt {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// The raw upstream payload, passed through for the client.
    pub data: Value,
}

/// Outcome of a quote-request email batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequestReceipt {
    pub sent_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Stage mutation, keyed by `requestId` with a legacy `id` fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StageUpdate {
    /// The row key the update targets: `requestId` when present, `id`
    /// otherwise.
    pub fn target_id(&self) -> Option<&str> {
        self.request_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(self.id.as_deref().filter(|id| !id.is_empty()))
    }
}

/// Negotiation data for one quotation row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NegotiationUpdate {
    pub request_id: String,
    pub vendor_name: String,
    pub negotiation_notes: String,
    /// `None` clears the recorded amount (the sheet stores a blank cell).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiated_amount: Option<f64>,
}

/// Gateway to the remote scripting endpoint that fronts the spreadsheet.
///
/// Every method maps to one `action` of the remote script. Mutations touch
/// exactly one row, matched upstream on request id + vendor name; the remote
/// script is the only serialization point and the last write wins.
#[async_trait]
pub trait SheetGateway: Send + Sync {
    async fn fetch_submissions(&self) -> Result<Vec<Submission>>;

    async fn fetch_products(&self, search: Option<&str>) -> Result<Vec<String>>;

    async fn fetch_vendors(&self, item_name: Option<&str>) -> Result<Vec<Vendor>>;

    /// Quotation rows for a request, already normalized.
    async fn fetch_quotations(&self, request_id: &str) -> Result<Vec<Quotation>>;

    async fn fetch_vendor_history(&self, vendor_name: &str) -> Result<Vec<VendorHistoryRecord>>;

    /// Returns the upstream receipt carrying the generated request id.
    async fn submit_intake(&self, form: &IntakeForm) -> Result<IntakeReceipt>;

    /// Returns the upstream confirmation message.
    async fn submit_quotation(&self, submission: &QuotationSubmission) -> Result<String>;

    async fn send_quote_requests(
        &self,
        request_id: &str,
        vendors: &[String],
    ) -> Result<QuoteRequestReceipt>;

    async fn update_stage(&self, update: &StageUpdate) -> Result<Value>;

    async fn update_vendor_selection(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_selected: bool,
    ) -> Result<Value>;

    async fn update_negotiation(&self, update: &NegotiationUpdate) -> Result<Value>;

    async fn update_agreement(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_accepted: bool,
    ) -> Result<Value>;

    async fn update_vendor_approval(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_approved: bool,
    ) -> Result<Value>;

    async fn send_purchase_order(&self, draft: &PurchaseOrderDraft) -> Result<Value>;
}

/// Per-request record of which vendors a quote-request email went out to.
///
/// A fallback cache, never the source of truth: live quotation rows win
/// whenever the backend answers.
#[async_trait]
pub trait SentQuotesStore: Send + Sync {
    async fn load(&self, request_id: &str) -> Result<Option<Vec<String>>>;

    async fn store(&self, request_id: &str, vendors: &[String]) -> Result<()>;
}
