//! Quotation types

use serde::{Deserialize, Serialize};

/// A normalized quotation row.
///
/// The composite key is (request id, vendor name). Flag fields are always
/// exactly 0 or 1 after normalization; blanks and garbage coerce to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quotation {
    pub request_id: String,
    pub vendor_name: String,
    pub vendor_email: String,
    pub phone_number: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub delivery_time: String,
    pub notes: String,
    pub attachment_url: String,
    pub submitted_date: String,
    pub negotiation_notes: String,
    pub negotiated_amount: f64,
    pub selected: u8,
    pub agreement_accepted: u8,
    pub agreement_sent_date: String,
    pub agreement_accepted_date: String,
    pub vendor_approved: u8,
    pub vendor_approved_date: String,
    pub po_sent: u8,
    pub po_number: String,
    pub po_date: String,
    pub ship_via: String,
    pub fob: String,
    pub shipping_terms: String,
}

impl Quotation {
    pub fn is_selected(&self) -> bool {
        self.selected == 1
    }

    pub fn has_accepted_agreement(&self) -> bool {
        self.agreement_accepted == 1
    }

    pub fn is_vendor_approved(&self) -> bool {
        self.vendor_approved == 1
    }

    pub fn is_po_sent(&self) -> bool {
        self.po_sent == 1
    }

    /// Negotiation is recorded when the amount is positive and the notes are
    /// non-blank. Both are required; either alone is a draft.
    pub fn has_negotiation_data(&self) -> bool {
        self.negotiated_amount > 0.0 && !self.negotiation_notes.trim().is_empty()
    }
}

/// Vendor quotation submission payload.
///
/// Prices stay as text: the form posts strings, some clients post numbers,
/// and the sheet takes either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationSubmission {
    pub request_id: String,
    pub vendor_name: String,
    pub vendor_email: String,
    #[serde(deserialize_with = "super::submission::stringly")]
    pub unit_price: String,
    #[serde(deserialize_with = "super::submission::stringly")]
    pub total_price: String,
    pub delivery_time: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiation_requires_amount_and_notes() {
        let mut quotation = Quotation {
            selected: 1,
            negotiated_amount: 450.0,
            negotiation_notes: "two year warranty included".into(),
            ..Default::default()
        };
        assert!(quotation.has_negotiation_data());

        quotation.negotiation_notes = "   ".into();
        assert!(!quotation.has_negotiation_data());

        quotation.negotiation_notes = "pending".into();
        quotation.negotiated_amount = 0.0;
        assert!(!quotation.has_negotiation_data());
    }
}
