//! Shared test doubles for service-level tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use procura_core::ports::{
    IntakeReceipt, NegotiationUpdate, QuoteRequestReceipt, SentQuotesStore, SheetGateway,
    StageUpdate,
};
use procura_domain::{
    IntakeForm, ProcuraError, PurchaseOrderDraft, Quotation, QuotationSubmission, Result,
    Submission, Vendor, VendorHistoryRecord,
};
use serde_json::{json, Value};

/// In-memory sheet standing in for the scripting endpoint.
///
/// Mutations edit the stored rows the way the remote script would, so
/// fetch-after-write tests observe real state changes.
#[derive(Default)]
pub struct MockSheetGateway {
    pub submissions: Mutex<Vec<Submission>>,
    pub quotations: Mutex<HashMap<String, Vec<Quotation>>>,
    pub quotations_unavailable: AtomicBool,
    pub intake_forms: Mutex<Vec<IntakeForm>>,
    pub approval_writes: Mutex<Vec<(String, String, bool)>>,
    pub quote_request_batches: Mutex<Vec<(String, Vec<String>)>>,
    pub stage_updates: Mutex<Vec<StageUpdate>>,
}

impl MockSheetGateway {
    pub fn with_submissions(submissions: Vec<Submission>) -> Self {
        Self { submissions: Mutex::new(submissions), ..Default::default() }
    }

    pub fn put_quotations(&self, request_id: &str, quotations: Vec<Quotation>) {
        self.quotations.lock().unwrap().insert(request_id.to_string(), quotations);
    }

    pub fn fail_quotations(&self, fail: bool) {
        self.quotations_unavailable.store(fail, Ordering::SeqCst);
    }

    fn edit_quotation(
        &self,
        request_id: &str,
        vendor_name: &str,
        edit: impl FnOnce(&mut Quotation),
    ) -> Result<Value> {
        let mut all = self.quotations.lock().unwrap();
        let rows = all
            .get_mut(request_id)
            .ok_or_else(|| ProcuraError::upstream(404, "no quotations for request"))?;
        let row = rows
            .iter_mut()
            .find(|q| q.vendor_name == vendor_name)
            .ok_or_else(|| ProcuraError::upstream(404, "vendor not found"))?;
        edit(row);
        Ok(json!({"updated": true}))
    }
}

#[async_trait]
impl SheetGateway for MockSheetGateway {
    async fn fetch_submissions(&self) -> Result<Vec<Submission>> {
        Ok(self.submissions.lock().unwrap().clone())
    }

    async fn fetch_products(&self, search: Option<&str>) -> Result<Vec<String>> {
        let products = vec!["Laptop".to_string(), "Monitor".to_string()];
        Ok(match search {
            Some(term) if !term.is_empty() => products
                .into_iter()
                .filter(|p| p.to_lowercase().contains(&term.to_lowercase()))
                .collect(),
            _ => products,
        })
    }

    async fn fetch_vendors(&self, _item_name: Option<&str>) -> Result<Vec<Vendor>> {
        Ok(Vec::new())
    }

    async fn fetch_quotations(&self, request_id: &str) -> Result<Vec<Quotation>> {
        if self.quotations_unavailable.load(Ordering::SeqCst) {
            return Err(ProcuraError::Network("script endpoint unreachable".into()));
        }
        Ok(self.quotations.lock().unwrap().get(request_id).cloned().unwrap_or_default())
    }

    async fn fetch_vendor_history(&self, _vendor_name: &str) -> Result<Vec<VendorHistoryRecord>> {
        Ok(Vec::new())
    }

    async fn submit_intake(&self, form: &IntakeForm) -> Result<IntakeReceipt> {
        self.intake_forms.lock().unwrap().push(form.clone());
        Ok(IntakeReceipt {
            request_id: "REQ-2024-100".to_string(),
            customer_id: Some("CUST-9".to_string()),
            data: json!({"requestId": "REQ-2024-100"}),
        })
    }

    async fn submit_quotation(&self, _submission: &QuotationSubmission) -> Result<String> {
        Ok("Quotation submitted successfully".to_string())
    }

    async fn send_quote_requests(
        &self,
        request_id: &str,
        vendors: &[String],
    ) -> Result<QuoteRequestReceipt> {
        self.quote_request_batches
            .lock()
            .unwrap()
            .push((request_id.to_string(), vendors.to_vec()));
        Ok(QuoteRequestReceipt { sent_count: vendors.len() as u32, message: None })
    }

    async fn update_stage(&self, update: &StageUpdate) -> Result<Value> {
        self.stage_updates.lock().unwrap().push(update.clone());
        Ok(json!({"updated": true}))
    }

    async fn update_vendor_selection(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_selected: bool,
    ) -> Result<Value> {
        self.edit_quotation(request_id, vendor_name, |q| {
            q.selected = u8::from(is_selected);
        })
    }

    async fn update_negotiation(&self, update: &NegotiationUpdate) -> Result<Value> {
        self.edit_quotation(&update.request_id, &update.vendor_name, |q| {
            q.negotiation_notes = update.negotiation_notes.clone();
            q.negotiated_amount = update.negotiated_amount.unwrap_or(0.0);
        })
    }

    async fn update_agreement(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_accepted: bool,
    ) -> Result<Value> {
        self.edit_quotation(request_id, vendor_name, |q| {
            q.agreement_accepted = u8::from(is_accepted);
        })
    }

    async fn update_vendor_approval(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_approved: bool,
    ) -> Result<Value> {
        self.approval_writes.lock().unwrap().push((
            request_id.to_string(),
            vendor_name.to_string(),
            is_approved,
        ));
        self.edit_quotation(request_id, vendor_name, |q| {
            q.vendor_approved = u8::from(is_approved);
            q.vendor_approved_date =
                if is_approved { "2024-11-02".to_string() } else { String::new() };
        })
    }

    async fn send_purchase_order(&self, draft: &PurchaseOrderDraft) -> Result<Value> {
        self.edit_quotation(&draft.request_id, &draft.vendor_name, |q| {
            q.po_sent = 1;
            q.po_number = draft.po_number.clone();
            q.po_date = draft.po_date.clone();
        })
    }
}

/// In-memory sent-quotes cache.
#[derive(Default)]
pub struct MemorySentQuotesStore {
    pub entries: Mutex<HashMap<String, Vec<String>>>,
}

#[async_trait]
impl SentQuotesStore for MemorySentQuotesStore {
    async fn load(&self, request_id: &str) -> Result<Option<Vec<String>>> {
        Ok(self.entries.lock().unwrap().get(request_id).cloned())
    }

    async fn store(&self, request_id: &str, vendors: &[String]) -> Result<()> {
        self.entries.lock().unwrap().insert(request_id.to_string(), vendors.to_vec());
        Ok(())
    }
}

pub fn submission(request_id: &str, stage: &str) -> Submission {
    Submission {
        id: request_id.trim_start_matches("REQ-2024-").to_string(),
        timestamp: "2024-11-02T09:15:00Z".to_string(),
        request_id: Some(request_id.to_string()),
        requester_name: "Dana Cole".to_string(),
        requester_email: "dana@example.com".to_string(),
        department: "IT".to_string(),
        item_name: "Laptop".to_string(),
        quantity: "2".to_string(),
        stage: procura_domain::Stage::parse(stage),
        ..Default::default()
    }
}

pub fn quotation(request_id: &str, vendor: &str) -> Quotation {
    Quotation {
        request_id: request_id.to_string(),
        vendor_name: vendor.to_string(),
        vendor_email: format!("sales@{}.example", vendor.to_lowercase()),
        unit_price: 500.0,
        total_price: 1000.0,
        ..Default::default()
    }
}
