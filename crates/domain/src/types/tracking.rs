//! Tracking view model

use serde::{Deserialize, Serialize};

use super::purchase_order::PurchaseOrderDraft;
use super::quotation::Quotation;
use super::stage::{StageStatus, StageView};
use super::submission::Submission;

/// The assembled per-request progress view: the submission, its normalized
/// quotations, and the derived per-stage status for one audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSnapshot {
    pub submission: Submission,
    pub view: StageView,
    pub stages: Vec<StageStatus>,
    pub quotations: Vec<Quotation>,
    /// Vendors a quote-request email went out to (live data when available,
    /// cached otherwise).
    pub vendors_sent_quotes: Vec<String>,
    pub rejected: bool,
    /// Synthesized PO document for the first approved quotation, when one
    /// exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order: Option<PurchaseOrderDraft>,
}
