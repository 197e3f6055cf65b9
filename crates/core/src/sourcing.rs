//! Vendor tier grouping and selection-state derivation

use std::collections::BTreeSet;

use procura_domain::{Quotation, Vendor, VendorTier};
use serde::{Deserialize, Serialize};

/// Vendors grouped by tier for the sourcing view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBuckets {
    pub gold: Vec<Vendor>,
    pub silver: Vec<Vendor>,
    pub bronze: Vec<Vendor>,
    pub other: Vec<Vendor>,
}

impl TierBuckets {
    pub fn len(&self) -> usize {
        self.gold.len() + self.silver.len() + self.bronze.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group vendors into GOLD/SILVER/BRONZE/OTHER buckets, preserving the
/// upstream order within each bucket.
pub fn group_by_tier(vendors: &[Vendor]) -> TierBuckets {
    let mut buckets = TierBuckets::default();
    for vendor in vendors {
        match vendor.tier_bucket() {
            VendorTier::Gold => buckets.gold.push(vendor.clone()),
            VendorTier::Silver => buckets.silver.push(vendor.clone()),
            VendorTier::Bronze => buckets.bronze.push(vendor.clone()),
            VendorTier::Other => buckets.other.push(vendor.clone()),
        }
    }
    buckets
}

/// Vendor names with `selected = 1`, deduplicated and trimmed.
pub fn selected_vendor_names(quotations: &[Quotation]) -> BTreeSet<String> {
    quotations
        .iter()
        .filter(|q| q.is_selected())
        .map(|q| q.vendor_name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Vendor names with `vendor_approved = 1`, deduplicated and trimmed.
pub fn approved_vendor_names(quotations: &[Quotation]) -> BTreeSet<String> {
    quotations
        .iter()
        .filter(|q| q.is_vendor_approved())
        .map(|q| q.vendor_name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Every vendor with a quotation row, whether or not a quote came back.
/// Receiving a quote-request email creates the row, so this doubles as the
/// authoritative "quotes sent to" list.
pub fn vendors_with_rows(quotations: &[Quotation]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for quotation in quotations {
        let name = quotation.vendor_name.trim();
        if !name.is_empty() && seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
    names
}
