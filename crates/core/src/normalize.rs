//! Quotation row normalization
//!
//! The scripting endpoint emits quotation rows with two key families: a
//! lowercase space-free family derived from the sheet headers (reliable) and
//! a human-readable family written from hardcoded column indices (sometimes
//! pointing at the wrong column). Every consumer goes through this module so
//! the coercion rules exist exactly once.
//!
//! Resolution order per logical field:
//! 1. Exact key match, lowercase family first.
//! 2. Case- and whitespace-insensitive key match, same alias order.
//! 3. Field-specific recovery scans (misplaced price, attachment URL,
//!    submitted date) as a last resort. The price scan is a known fragility
//!    inherited from the upstream contract; it is kept deliberately narrow.

use once_cell::sync::Lazy;
use procura_domain::constants::PRICE_RECOVERY_CEILING;
use procura_domain::Quotation;
use regex::Regex;
use serde_json::{Map, Value};

static SHEET_DATE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap()
});

/// Coerce a boolean-like cell to exactly 0 or 1.
///
/// The canonical rule: 1 iff the value numerically equals 1 — numbers,
/// numeric strings, or boolean `true` (a boolean read as an integer).
/// Blanks, other numbers, and garbage are 0.
pub fn coerce_flag(value: &Value) -> u8 {
    match value {
        Value::Number(n) => u8::from(n.as_f64() == Some(1.0)),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => u8::from(n == 1.0),
            Err(_) => 0,
        },
        Value::Bool(b) => u8::from(*b),
        _ => 0,
    }
}

/// Coerce a price-like cell to `f64`, stripping currency symbols and
/// separators from strings. Unparseable values are 0.
pub fn coerce_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let cleaned: String =
                s.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();
            cleaned.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

fn canonical_key(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Read-only view over a raw row with alias-priority field resolution.
struct RawRow<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> RawRow<'a> {
    fn get(&self, aliases: &[&str]) -> Option<&'a Value> {
        for alias in aliases {
            if let Some(value) = self.map.get(*alias) {
                if !is_blank(value) {
                    return Some(value);
                }
            }
        }
        for alias in aliases {
            let wanted = canonical_key(alias);
            for (key, value) in self.map {
                if canonical_key(key) == wanted && !is_blank(value) {
                    return Some(value);
                }
            }
        }
        None
    }

    fn string(&self, aliases: &[&str]) -> String {
        self.get(aliases).map(value_to_string).unwrap_or_default()
    }

    fn flag(&self, aliases: &[&str]) -> u8 {
        self.get(aliases).map(coerce_flag).unwrap_or(0)
    }

    fn price(&self, aliases: &[&str]) -> f64 {
        self.get(aliases).map(coerce_price).unwrap_or(0.0)
    }

    /// Last-resort scan for a misplaced price column: the first value that
    /// parses to a positive number under the recovery ceiling and is neither
    /// the row's phone number nor an already-recovered price.
    fn recover_price(&self, phone: &str, exclude: Option<f64>) -> Option<f64> {
        let phone_digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        for value in self.map.values() {
            if is_blank(value) {
                continue;
            }
            let candidate = coerce_price(value);
            if candidate <= 0.0 || candidate >= PRICE_RECOVERY_CEILING {
                continue;
            }
            if format_numeric(candidate) == phone_digits {
                continue;
            }
            if let Some(taken) = exclude {
                if (candidate - taken).abs() < f64::EPSILON {
                    continue;
                }
            }
            return Some(candidate);
        }
        None
    }

    fn recover_url(&self) -> String {
        self.map
            .values()
            .filter_map(|v| v.as_str())
            .find(|s| s.contains("http"))
            .map(str::to_string)
            .unwrap_or_default()
    }

    fn recover_sheet_date(&self) -> String {
        self.map
            .values()
            .filter_map(|v| v.as_str())
            .find(|s| SHEET_DATE.is_match(s))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

fn format_numeric(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Normalize one raw quotation row into the canonical [`Quotation`] shape.
///
/// Non-object values normalize to an all-default quotation rather than an
/// error; the upstream occasionally pads result arrays with junk and a blank
/// row is harmless downstream.
pub fn normalize_quotation(raw: &Value) -> Quotation {
    let Some(map) = raw.as_object() else {
        return Quotation::default();
    };
    let row = RawRow { map };

    let phone_number = row.string(&["phonenumber", "Phone Number"]);

    let unit_price = match row.get(&["unitprice", "Unit Price"]) {
        Some(value) => coerce_price(value),
        None => row.recover_price(&phone_number, None).unwrap_or(0.0),
    };
    let total_price = match row.get(&["totalprice", "Total Price"]) {
        Some(value) => coerce_price(value),
        None => row.recover_price(&phone_number, Some(unit_price)).unwrap_or(0.0),
    };

    let attachment_url = match row.get(&["attachmenturl", "Attachment URL"]) {
        Some(value) => value_to_string(value),
        None => row.recover_url(),
    };
    let submitted_date = match row.get(&["submitteddate", "Submitted Date"]) {
        Some(value) => value_to_string(value),
        None => row.recover_sheet_date(),
    };

    Quotation {
        request_id: row.string(&["requestid", "Request ID"]),
        vendor_name: row.string(&["vendorname", "Vendor Name"]),
        vendor_email: row.string(&["vendoremail", "Vendor Email"]),
        phone_number,
        unit_price,
        total_price,
        delivery_time: row.string(&["deliverytime", "Delivery Time"]),
        notes: row.string(&["notes", "Notes"]),
        attachment_url,
        submitted_date,
        negotiation_notes: row.string(&["negotiationnotes", "Negotiation Notes"]),
        negotiated_amount: row.price(&["negotiatedamount", "Negotiated Amount"]),
        selected: row.flag(&["selected", "Selected"]),
        agreement_accepted: row.flag(&["agreementaccepted", "Agreement Accepted"]),
        agreement_sent_date: row.string(&["agreementsentdate", "Agreement Sent Date"]),
        agreement_accepted_date: row.string(&["agreementaccepteddate", "Agreement Accepted Date"]),
        vendor_approved: row.flag(&["vendorapproved", "Vendor Approved"]),
        vendor_approved_date: row.string(&["vendorapproveddate", "Vendor Approved Date"]),
        po_sent: row.flag(&["posent", "PO Sent"]),
        po_number: row.string(&["ponumber", "PO Number"]),
        po_date: row.string(&["podate", "PO Date"]),
        ship_via: row.string(&["shipvia", "Ship Via"]),
        fob: row.string(&["fob", "F.O.B."]),
        shipping_terms: row.string(&["shippingterms", "Shipping Terms"]),
    }
}

/// Normalize a whole upstream result array.
pub fn normalize_quotations(raw: &[Value]) -> Vec<Quotation> {
    raw.iter().map(normalize_quotation).collect()
}
