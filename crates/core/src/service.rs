//! Procurement workflow service - core business logic

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime};
use procura_domain::{
    IntakeForm, ProcuraError, PurchaseOrderDraft, Quotation, QuotationSubmission, Result, Stage,
    StageView, Submission, TrackingSnapshot, Vendor, VendorHistoryRecord,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ports::{
    IntakeReceipt, NegotiationUpdate, QuoteRequestReceipt, SentQuotesStore, SheetGateway,
    StageUpdate,
};
use crate::purchase_order::draft_purchase_order;
use crate::sourcing::vendors_with_rows;
use crate::stages::{stage_statuses, StageInputs};

/// Procurement workflow service
///
/// Orchestrates the scripting-endpoint gateway and the sent-quotes cache.
/// All state lives in the spreadsheet; this service holds no durable state
/// of its own.
pub struct ProcurementService {
    gateway: Arc<dyn SheetGateway>,
    sent_quotes: Arc<dyn SentQuotesStore>,
}

impl ProcurementService {
    pub fn new(gateway: Arc<dyn SheetGateway>, sent_quotes: Arc<dyn SentQuotesStore>) -> Self {
        Self { gateway, sent_quotes }
    }

    /// All submission rows, as stored.
    pub async fn list_submissions(&self) -> Result<Vec<Submission>> {
        self.gateway.fetch_submissions().await
    }

    /// Requests in the procurement team's working set, newest first.
    pub async fn pipeline_submissions(&self) -> Result<Vec<Submission>> {
        let mut submissions: Vec<Submission> = self
            .gateway
            .fetch_submissions()
            .await?
            .into_iter()
            .filter(|s| s.stage.in_procurement_pipeline())
            .collect();
        submissions.sort_by_key(|s| std::cmp::Reverse(timestamp_sort_key(&s.timestamp)));
        Ok(submissions)
    }

    pub async fn search_products(&self, search: Option<&str>) -> Result<Vec<String>> {
        self.gateway.fetch_products(search).await
    }

    pub async fn vendors_for_item(&self, item_name: Option<&str>) -> Result<Vec<Vendor>> {
        self.gateway.fetch_vendors(item_name).await
    }

    pub async fn quotations(&self, request_id: &str) -> Result<Vec<Quotation>> {
        self.gateway.fetch_quotations(request_id).await
    }

    pub async fn vendor_history(&self, vendor_name: &str) -> Result<Vec<VendorHistoryRecord>> {
        self.gateway.fetch_vendor_history(vendor_name).await
    }

    /// Vendors a quote-request email went out to for this request.
    ///
    /// Receiving a quote-request creates a quotation row, so the live rows
    /// are authoritative; the cache only answers when the backend does not.
    pub async fn vendors_sent_quotes(&self, request_id: &str) -> Result<Vec<String>> {
        match self.gateway.fetch_quotations(request_id).await {
            Ok(quotations) => {
                let vendors = vendors_with_rows(&quotations);
                self.remember_sent_quotes(request_id, &vendors).await;
                Ok(vendors)
            }
            Err(err) => {
                debug!(request_id, error = %err, "quotations fetch failed, trying cache");
                match self.sent_quotes.load(request_id).await {
                    Ok(Some(vendors)) => Ok(vendors),
                    _ => Err(err),
                }
            }
        }
    }

    /// Submit a new procurement request.
    ///
    /// The stage is forced to `Intake` regardless of anything the client
    /// sent; all intake forms start there.
    pub async fn submit_intake(&self, form: &IntakeForm) -> Result<IntakeReceipt> {
        let mut form = form.clone();
        form.stage = Some(Stage::Intake.as_str().to_string());
        self.gateway.submit_intake(&form).await
    }

    pub async fn submit_quotation(&self, submission: &QuotationSubmission) -> Result<String> {
        self.gateway.submit_quotation(submission).await
    }

    /// Send quote-request emails and remember the recipients.
    pub async fn send_quote_requests(
        &self,
        request_id: &str,
        vendors: &[String],
    ) -> Result<QuoteRequestReceipt> {
        let receipt = self.gateway.send_quote_requests(request_id, vendors).await?;
        self.remember_sent_quotes(request_id, vendors).await;
        Ok(receipt)
    }

    pub async fn update_stage(&self, update: &StageUpdate) -> Result<Value> {
        if update.target_id().is_none() {
            return Err(ProcuraError::Validation(
                "requestId or id is required to update a stage".to_string(),
            ));
        }
        self.gateway.update_stage(update).await
    }

    pub async fn set_vendor_selection(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_selected: bool,
    ) -> Result<Value> {
        self.gateway.update_vendor_selection(request_id, vendor_name, is_selected).await
    }

    pub async fn save_negotiation(&self, update: &NegotiationUpdate) -> Result<Value> {
        self.gateway.update_negotiation(update).await
    }

    pub async fn set_agreement(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_accepted: bool,
    ) -> Result<Value> {
        self.gateway.update_agreement(request_id, vendor_name, is_accepted).await
    }

    pub async fn set_vendor_approval(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_approved: bool,
    ) -> Result<Value> {
        self.gateway.update_vendor_approval(request_id, vendor_name, is_approved).await
    }

    pub async fn send_purchase_order(&self, draft: &PurchaseOrderDraft) -> Result<Value> {
        self.gateway.send_purchase_order(draft).await
    }

    /// Find one submission by request id (falling back to the row id).
    pub async fn find_submission(&self, request_id: &str) -> Result<Submission> {
        self.gateway
            .fetch_submissions()
            .await?
            .into_iter()
            .find(|s| s.effective_id() == request_id || s.id == request_id)
            .ok_or_else(|| ProcuraError::NotFound(format!("request {request_id} not found")))
    }

    /// Assemble the per-request progress view for one audience.
    ///
    /// Quotation and sent-quotes lookups degrade to empty rather than
    /// failing the whole view; a tracking page with a missing sidebar beats
    /// no tracking page.
    pub async fn track(&self, request_id: &str, view: StageView) -> Result<TrackingSnapshot> {
        let submission = self.find_submission(request_id).await?;
        let key = submission.effective_id().to_string();

        let (quotations, live) = match self.gateway.fetch_quotations(&key).await {
            Ok(quotations) => (quotations, true),
            Err(err) => {
                warn!(request_id = %key, error = %err, "quotations unavailable for tracking view");
                (Vec::new(), false)
            }
        };

        // Live data wins even when empty; the cache only answers when the
        // backend does not.
        let vendors_sent_quotes = if live {
            let vendors = vendors_with_rows(&quotations);
            self.remember_sent_quotes(&key, &vendors).await;
            vendors
        } else {
            match self.sent_quotes.load(&key).await {
                Ok(Some(vendors)) => vendors,
                _ => Vec::new(),
            }
        };

        let inputs = StageInputs {
            current: &submission.stage,
            quotations: &quotations,
            vendors_sent_quotes: &vendors_sent_quotes,
        };
        let stages = stage_statuses(view, &inputs);
        let rejected = submission.stage.is_rejected();

        // The requester view renders a PO document once a vendor is
        // approved; draft it from the first approved quotation.
        let purchase_order = quotations
            .iter()
            .find(|q| q.is_selected() && q.is_vendor_approved())
            .map(|q| draft_purchase_order(&submission, q));

        Ok(TrackingSnapshot {
            submission,
            view,
            stages,
            quotations,
            vendors_sent_quotes,
            rejected,
            purchase_order,
        })
    }

    async fn remember_sent_quotes(&self, request_id: &str, vendors: &[String]) {
        if let Err(err) = self.sent_quotes.store(request_id, vendors).await {
            warn!(request_id, error = %err, "failed to update sent-quotes cache");
        }
    }
}

/// Sort key for sheet timestamps: RFC 3339 first, the sheet's own
/// `dd/mm/yyyy hh:mm:ss` second, everything else sorts last.
fn timestamp_sort_key(raw: &str) -> i64 {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.timestamp_millis();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%d/%m/%Y %H:%M:%S") {
        return parsed.and_utc().timestamp_millis();
    }
    i64::MIN
}
