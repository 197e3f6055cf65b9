//! Vendor types

use serde::{Deserialize, Serialize};

/// A vendor row from the vendors sheet, filtered by item name upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vendor {
    pub name: String,
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

/// Vendor classification used for grouping in the sourcing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VendorTier {
    Gold,
    Silver,
    Bronze,
    Other,
}

impl Vendor {
    /// Tier bucket for this vendor; casing and surrounding whitespace in the
    /// sheet value are ignored, anything unrecognized lands in `Other`.
    pub fn tier_bucket(&self) -> VendorTier {
        match self.tier.as_deref().map(|t| t.trim().to_uppercase()) {
            Some(t) if t == "GOLD" => VendorTier::Gold,
            Some(t) if t == "SILVER" => VendorTier::Silver,
            Some(t) if t == "BRONZE" => VendorTier::Bronze,
            _ => VendorTier::Other,
        }
    }
}

/// Free-form vendor history row, rendered generically by the client.
pub type VendorHistoryRecord = serde_json::Map<String, serde_json::Value>;
