//! Procurement request types

use serde::{Deserialize, Deserializer, Serialize};

use super::stage::Stage;

/// A procurement request row as stored in the submissions sheet.
///
/// All scalar fields are strings because the sheet stores them that way;
/// coercion happens at the edges that need numbers. Cells the sheet holds as
/// numbers (row ids, quantities) deserialize to their string form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    #[serde(deserialize_with = "stringly")]
    pub id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "stringly_opt")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "stringly_opt")]
    pub request_id: Option<String>,
    pub requester_name: String,
    pub requester_email: String,
    pub department: String,
    pub cost_center: String,
    #[serde(rename = "class")]
    pub item_class: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub item_name: String,
    pub description: String,
    #[serde(deserialize_with = "stringly")]
    pub quantity: String,
    pub preferred_vendor: String,
    #[serde(deserialize_with = "stringly")]
    pub estimated_cost: String,
    pub priority: String,
    pub required_date: String,
    pub stage: Stage,
}

/// The sheet is untyped: a cell we treat as text may come back as a number.
pub(crate) fn stringly<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Bool(bool),
        Null,
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Bool(b) => b.to_string(),
        Raw::Null => String::new(),
    })
}

fn stringly_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    stringly(deserializer).map(|s| if s.is_empty() { None } else { Some(s) })
}

impl Submission {
    /// The identifier the rest of the system keys on: `requestId` when the
    /// sheet has one, the row `id` otherwise.
    pub fn effective_id(&self) -> &str {
        self.request_id.as_deref().filter(|id| !id.is_empty()).unwrap_or(&self.id)
    }
}

/// Accepts the two shapes the intake form historically sent for the
/// preferred vendor field: a single string or an array of names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferredVendor {
    One(String),
    Many(Vec<String>),
}

impl Default for PreferredVendor {
    fn default() -> Self {
        Self::One(String::new())
    }
}

impl PreferredVendor {
    /// Flatten to the comma-joined form the sheet stores.
    pub fn joined(&self) -> String {
        match self {
            Self::One(name) => name.clone(),
            Self::Many(names) => names.join(", "),
        }
    }
}

/// The intake form payload as submitted by the client.
///
/// `stage` is accepted for wire compatibility but always overridden to
/// `Intake` before the request is forwarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeForm {
    pub requester_name: String,
    pub requester_email: String,
    pub department: String,
    pub cost_center: String,
    #[serde(rename = "class")]
    pub item_class: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub item_name: String,
    pub description: String,
    #[serde(deserialize_with = "stringly")]
    pub quantity: String,
    pub preferred_vendor: PreferredVendor,
    #[serde(deserialize_with = "stringly")]
    pub estimated_cost: String,
    pub priority: String,
    pub required_date: String,
    pub stage: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_id_prefers_request_id() {
        let mut submission = Submission { id: "42".into(), ..Default::default() };
        assert_eq!(submission.effective_id(), "42");

        submission.request_id = Some("REQ-2024-001".into());
        assert_eq!(submission.effective_id(), "REQ-2024-001");

        submission.request_id = Some(String::new());
        assert_eq!(submission.effective_id(), "42");
    }

    #[test]
    fn preferred_vendor_accepts_string_or_array() {
        let form: IntakeForm =
            serde_json::from_str(r#"{"itemName":"Laptop","preferredVendor":"Acme"}"#).unwrap();
        assert_eq!(form.preferred_vendor.joined(), "Acme");

        let form: IntakeForm =
            serde_json::from_str(r#"{"preferredVendor":["Acme","Globex"]}"#).unwrap();
        assert_eq!(form.preferred_vendor.joined(), "Acme, Globex");
    }

    #[test]
    fn numeric_sheet_cells_deserialize_to_strings() {
        let row = r#"{"id": 7, "quantity": 2, "estimatedCost": 50000, "stage": "Intake"}"#;
        let submission: Submission = serde_json::from_str(row).unwrap();
        assert_eq!(submission.id, "7");
        assert_eq!(submission.quantity, "2");
        assert_eq!(submission.estimated_cost, "50000");
    }

    #[test]
    fn submission_parses_sheet_row_shape() {
        let row = r#"{
            "id": "7",
            "timestamp": "2024-11-02T09:15:00Z",
            "requestId": "REQ-2024-007",
            "requesterName": "Dana Cole",
            "class": "IT",
            "type": "Hardware",
            "itemName": "Laptop",
            "quantity": "2",
            "stage": "Sourcing"
        }"#;
        let submission: Submission = serde_json::from_str(row).unwrap();
        assert_eq!(submission.effective_id(), "REQ-2024-007");
        assert_eq!(submission.item_class, "IT");
        assert_eq!(submission.stage, Stage::Sourcing);
    }
}
