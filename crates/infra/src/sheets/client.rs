/// Scripting-endpoint client implementing the sheet gateway port.
use async_trait::async_trait;
use procura_core::normalize::normalize_quotations;
use procura_core::ports::{
    IntakeReceipt, NegotiationUpdate, QuoteRequestReceipt, SheetGateway, StageUpdate,
};
use procura_domain::{
    IntakeForm, ProcuraError, PurchaseOrderDraft, Quotation, QuotationSubmission, Result,
    SheetsConfig, Submission, Vendor, VendorHistoryRecord,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};
use url::Url;

use super::envelope::parse_envelope;
use crate::http::HttpClient;

/// Gateway to the remote scripting endpoint fronting the spreadsheet.
///
/// Reads go to the read URL, row mutations to the update URL; both fall back
/// to the base script URL. One HTTP call per operation, single attempt, no
/// caching.
pub struct SheetClient {
    config: SheetsConfig,
    http_client: HttpClient,
}

impl SheetClient {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .max_attempts(1)
            .user_agent(concat!("procura/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http_client })
    }

    fn base_url(&self) -> Result<&str> {
        require_configured(&self.config.script_url)
    }

    fn read_url(&self) -> Result<&str> {
        require_configured(self.config.effective_read_url())
    }

    fn update_url(&self) -> Result<&str> {
        require_configured(self.config.effective_update_url())
    }

    fn action_url(&self, base: &str, action: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| ProcuraError::Config(format!("invalid scripting endpoint URL: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            for (key, value) in params {
                if !value.is_empty() {
                    query.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        let correlation_id = uuid::Uuid::new_v4();
        debug!(%url, %correlation_id, "GET scripting endpoint");
        let request = self.http_client.request(Method::GET, url);
        let response = self.http_client.send(request).await?;
        Self::read_envelope(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let correlation_id = uuid::Uuid::new_v4();
        let action = body.get("action").and_then(Value::as_str).unwrap_or("-");
        debug!(url, action, %correlation_id, "POST scripting endpoint");
        let request = self.http_client.request(Method::POST, url).json(body);
        let response = self.http_client.send(request).await?;
        Self::read_envelope(response).await
    }

    async fn read_envelope(response: reqwest::Response) -> Result<Value> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ProcuraError::Network(format!("failed to read response body: {e}")))?;
        parse_envelope(status, content_type.as_deref(), &body)
    }
}

fn require_configured(url: &str) -> Result<&str> {
    if url.is_empty() {
        return Err(ProcuraError::Config(
            "Scripting endpoint URL not configured. Please set PROCURA_SCRIPT_URL".to_string(),
        ));
    }
    Ok(url)
}

fn plain_url(base: &str) -> Result<Url> {
    Url::parse(base)
        .map_err(|e| ProcuraError::Config(format!("invalid scripting endpoint URL: {e}")))
}

/// Map one raw vendor row, tolerating the tier column's casing variants.
fn map_vendor(row: &Value) -> Vendor {
    let tier = ["tier", "Tier", "TIER"]
        .iter()
        .filter_map(|key| row.get(*key))
        .filter_map(Value::as_str)
        .map(|t| t.trim().to_uppercase())
        .find(|t| !t.is_empty());
    Vendor {
        name: row.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        item_name: row.get("itemName").and_then(Value::as_str).unwrap_or_default().to_string(),
        tier,
    }
}

fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[async_trait]
impl SheetGateway for SheetClient {
    #[instrument(skip(self))]
    async fn fetch_submissions(&self) -> Result<Vec<Submission>> {
        let url = plain_url(self.read_url()?)?;
        let value = self.get_json(url).await?;

        // The script answers with either a bare array or a {data: [...]}
        // envelope depending on deployment vintage.
        let data = value.get("data").cloned().unwrap_or(value);
        serde_json::from_value(data).map_err(|e| {
            ProcuraError::UpstreamProtocol(format!("unexpected submissions shape: {e}"))
        })
    }

    #[instrument(skip(self))]
    async fn fetch_products(&self, search: Option<&str>) -> Result<Vec<String>> {
        let url =
            self.action_url(self.base_url()?, "products", &[("search", search.unwrap_or(""))])?;
        let value = self.get_json(url).await?;
        Ok(value
            .get("products")
            .and_then(Value::as_array)
            .map(|items| {
                items.iter().filter_map(Value::as_str).map(str::to_string).collect()
            })
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn fetch_vendors(&self, item_name: Option<&str>) -> Result<Vec<Vendor>> {
        let url = self.action_url(
            self.read_url()?,
            "vendors",
            &[("itemName", item_name.unwrap_or(""))],
        )?;
        let value = self.get_json(url).await?;
        Ok(value
            .get("vendors")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().map(map_vendor).collect())
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn fetch_quotations(&self, request_id: &str) -> Result<Vec<Quotation>> {
        let url =
            self.action_url(self.base_url()?, "quotations", &[("requestId", request_id)])?;
        let value = self.get_json(url).await?;
        let raw = value.get("quotations").and_then(Value::as_array).cloned().unwrap_or_default();
        Ok(normalize_quotations(&raw))
    }

    #[instrument(skip(self))]
    async fn fetch_vendor_history(&self, vendor_name: &str) -> Result<Vec<VendorHistoryRecord>> {
        let url = self.action_url(
            self.base_url()?,
            "vendorHistory",
            &[("vendorName", vendor_name)],
        )?;
        let value = self.get_json(url).await?;
        Ok(value
            .get("history")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter().filter_map(Value::as_object).cloned().collect()
            })
            .unwrap_or_default())
    }

    #[instrument(skip(self, form))]
    async fn submit_intake(&self, form: &IntakeForm) -> Result<IntakeReceipt> {
        let mut body = serde_json::to_value(form)
            .map_err(|e| ProcuraError::Internal(format!("failed to serialize intake: {e}")))?;
        // The sheet stores one comma-joined cell, whatever shape the client
        // sent.
        body["preferredVendor"] = json!(form.preferred_vendor.joined());

        let value = self.post_json(self.base_url()?, &body).await?;
        Ok(IntakeReceipt {
            request_id: string_field(&value, "requestId"),
            customer_id: value.get("customerId").and_then(Value::as_str).map(str::to_string),
            data: value,
        })
    }

    #[instrument(skip(self, submission))]
    async fn submit_quotation(&self, submission: &QuotationSubmission) -> Result<String> {
        let body = json!({
            "action": "submitQuotation",
            "requestId": submission.request_id,
            "vendorName": submission.vendor_name,
            "vendorEmail": submission.vendor_email,
            "unitPrice": submission.unit_price,
            "totalPrice": submission.total_price,
            "deliveryTime": submission.delivery_time,
            "notes": submission.notes,
        });
        let value = self.post_json(self.base_url()?, &body).await?;
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Quotation submitted successfully")
            .to_string();
        Ok(message)
    }

    #[instrument(skip(self, vendors), fields(vendor_count = vendors.len()))]
    async fn send_quote_requests(
        &self,
        request_id: &str,
        vendors: &[String],
    ) -> Result<QuoteRequestReceipt> {
        let body = json!({
            "action": "sendQuoteRequests",
            "requestId": request_id,
            "vendors": vendors,
        });
        let value = self.post_json(self.base_url()?, &body).await?;
        Ok(QuoteRequestReceipt {
            sent_count: value
                .get("sentCount")
                .and_then(Value::as_u64)
                .unwrap_or(vendors.len() as u64) as u32,
            message: value.get("message").and_then(Value::as_str).map(str::to_string),
        })
    }

    #[instrument(skip(self, update))]
    async fn update_stage(&self, update: &StageUpdate) -> Result<Value> {
        let target = update.target_id().unwrap_or_default();
        let body = json!({
            "id": target,
            "requestId": target,
            "stage": update.stage,
            "sourcingType": update.sourcing_type,
            "vendor": update.vendor,
            "notes": update.notes,
        });
        self.post_json(self.update_url()?, &body).await
    }

    #[instrument(skip(self))]
    async fn update_vendor_selection(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_selected: bool,
    ) -> Result<Value> {
        let body = json!({
            "action": "updateVendorSelection",
            "requestId": request_id,
            "vendorName": vendor_name,
            "isSelected": is_selected,
        });
        self.post_json(self.update_url()?, &body).await
    }

    #[instrument(skip(self, update))]
    async fn update_negotiation(&self, update: &NegotiationUpdate) -> Result<Value> {
        // A cleared amount goes up as an empty string; the script writes a
        // blank cell for it.
        let amount: Value = match update.negotiated_amount {
            Some(amount) => json!(amount),
            None => json!(""),
        };
        let body = json!({
            "action": "updateQuotationNegotiation",
            "requestId": update.request_id,
            "vendorName": update.vendor_name,
            "negotiationNotes": update.negotiation_notes,
            "negotiatedAmount": amount,
        });
        self.post_json(self.update_url()?, &body).await
    }

    #[instrument(skip(self))]
    async fn update_agreement(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_accepted: bool,
    ) -> Result<Value> {
        let body = json!({
            "action": "updateAgreementAcceptance",
            "requestId": request_id,
            "vendorName": vendor_name,
            "isAccepted": is_accepted,
        });
        self.post_json(self.update_url()?, &body).await
    }

    #[instrument(skip(self))]
    async fn update_vendor_approval(
        &self,
        request_id: &str,
        vendor_name: &str,
        is_approved: bool,
    ) -> Result<Value> {
        let body = json!({
            "action": "updateVendorApproval",
            "requestId": request_id,
            "vendorName": vendor_name,
            "isApproved": is_approved,
        });
        self.post_json(self.update_url()?, &body).await
    }

    #[instrument(skip(self, draft), fields(request_id = %draft.request_id, vendor = %draft.vendor_name))]
    async fn send_purchase_order(&self, draft: &PurchaseOrderDraft) -> Result<Value> {
        let body = json!({
            "action": "sendPurchaseOrder",
            "requestId": draft.request_id,
            "vendorName": draft.vendor_name,
            "vendorEmail": draft.vendor_email,
            "poNumber": draft.po_number,
            "poDate": draft.po_date,
            "itemName": draft.item_name,
            "quantity": draft.quantity,
            "unitPrice": draft.unit_price,
            "totalPrice": draft.total_price,
            "requesterEmail": draft.requester_email,
            "requesterName": draft.requester_name,
            "department": draft.department,
        });
        self.post_json(self.update_url()?, &body).await
    }
}
