//! # Procura Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Quotation row normalization (the one canonical coercion rule)
//! - Stage/completion inference shared by every audience view
//! - Vendor tier grouping and selection-state derivation
//! - Purchase order drafting
//! - Port/adapter interfaces (traits)
//! - The orchestration service used by the HTTP surface
//!
//! ## Architecture Principles
//! - Only depends on `procura-domain`
//! - No HTTP, filesystem, or environment code
//! - All external dependencies via traits

pub mod normalize;
pub mod ports;
pub mod purchase_order;
pub mod service;
pub mod sourcing;
pub mod stages;

// Re-export specific items to avoid ambiguity
pub use normalize::{coerce_flag, coerce_price, normalize_quotation};
pub use ports::{
    IntakeReceipt, NegotiationUpdate, QuoteRequestReceipt, SentQuotesStore, SheetGateway,
    StageUpdate,
};
pub use purchase_order::draft_purchase_order;
pub use service::ProcurementService;
pub use sourcing::{approved_vendor_names, group_by_tier, selected_vendor_names, TierBuckets};
pub use stages::{stage_statuses, StageInputs};
