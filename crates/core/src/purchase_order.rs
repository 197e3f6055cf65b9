//! Purchase order drafting

use chrono::Utc;
use procura_domain::constants::{DEFAULT_PO_QUANTITY, PO_NUMBER_PREFIX, PO_NUMBER_SUFFIX_LEN};
use procura_domain::{PurchaseOrderDraft, Quotation, Submission};

/// Draft a purchase order for an approved quotation.
///
/// The PO total prefers the negotiated amount over the quoted total. A row
/// that already carries a PO number keeps it; otherwise the number is
/// `PO-{request id}-{6-digit suffix}` with the suffix taken from the current
/// epoch milliseconds, matching the numbers already in the sheet.
pub fn draft_purchase_order(submission: &Submission, quotation: &Quotation) -> PurchaseOrderDraft {
    let total_price = if quotation.negotiated_amount > 0.0 {
        quotation.negotiated_amount
    } else {
        quotation.total_price
    };

    let po_number = if quotation.po_number.is_empty() {
        generate_po_number(submission.effective_id())
    } else {
        quotation.po_number.clone()
    };
    let po_date = if quotation.po_date.is_empty() {
        Utc::now().format("%d-%m-%Y").to_string()
    } else {
        quotation.po_date.clone()
    };

    PurchaseOrderDraft {
        request_id: submission.effective_id().to_string(),
        vendor_name: quotation.vendor_name.clone(),
        vendor_email: quotation.vendor_email.clone(),
        po_number,
        po_date,
        item_name: submission.item_name.clone(),
        quantity: submission.quantity.trim().parse().unwrap_or(DEFAULT_PO_QUANTITY),
        unit_price: quotation.unit_price,
        total_price,
        requester_email: submission.requester_email.clone(),
        requester_name: submission.requester_name.clone(),
        department: submission.department.clone(),
    }
}

fn generate_po_number(request_id: &str) -> String {
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    let modulus = 10u64.pow(PO_NUMBER_SUFFIX_LEN as u32);
    format!(
        "{}-{}-{:0width$}",
        PO_NUMBER_PREFIX,
        if request_id.is_empty() { "N/A" } else { request_id },
        millis % modulus,
        width = PO_NUMBER_SUFFIX_LEN
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission {
            id: "9".into(),
            request_id: Some("REQ-2024-009".into()),
            requester_name: "Dana Cole".into(),
            requester_email: "dana@example.com".into(),
            department: "IT".into(),
            item_name: "Laptop".into(),
            quantity: "2".into(),
            ..Default::default()
        }
    }

    fn quotation() -> Quotation {
        Quotation {
            request_id: "REQ-2024-009".into(),
            vendor_name: "Acme".into(),
            vendor_email: "sales@acme.example".into(),
            unit_price: 500.0,
            total_price: 1000.0,
            ..Default::default()
        }
    }

    #[test]
    fn po_number_embeds_request_id_and_six_digit_suffix() {
        let draft = draft_purchase_order(&submission(), &quotation());
        let suffix = draft.po_number.strip_prefix("PO-REQ-2024-009-").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn negotiated_amount_overrides_quoted_total() {
        let mut q = quotation();
        let draft = draft_purchase_order(&submission(), &q);
        assert_eq!(draft.total_price, 1000.0);

        q.negotiated_amount = 900.0;
        let draft = draft_purchase_order(&submission(), &q);
        assert_eq!(draft.total_price, 900.0);
        assert_eq!(draft.unit_price, 500.0);
    }

    #[test]
    fn stored_po_numbers_are_kept() {
        let mut q = quotation();
        q.po_number = "PO-REQ-2024-009-123456".into();
        q.po_date = "02-11-2024".into();
        let draft = draft_purchase_order(&submission(), &q);
        assert_eq!(draft.po_number, "PO-REQ-2024-009-123456");
        assert_eq!(draft.po_date, "02-11-2024");
    }

    #[test]
    fn quantity_falls_back_when_unparseable() {
        let mut s = submission();
        s.quantity = "a few".into();
        let draft = draft_purchase_order(&s, &quotation());
        assert_eq!(draft.quantity, 1);
    }
}
