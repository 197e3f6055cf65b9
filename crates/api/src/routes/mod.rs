//! Route table
//!
//! One handler per proxy operation, grouped by resource. All routes share
//! the `{success: true, ...}` / `{success: false, error}` envelope.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

pub mod health;
pub mod intake;
pub mod products;
pub mod purchase_order;
pub mod quotations;
pub mod stage;
pub mod submissions;
pub mod tracking;
pub mod vendor_actions;
pub mod vendors;

/// Build the application router over a shared context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/submissions", get(submissions::fetch_submissions))
        .route("/api/products", get(products::fetch_products))
        .route("/api/vendors", get(vendors::fetch_vendors))
        .route("/api/vendor-history", get(vendors::fetch_vendor_history))
        .route("/api/vendors-sent-quotes", get(vendors::fetch_vendors_sent_quotes))
        .route("/api/quotations", get(quotations::fetch_quotations))
        .route("/api/quotations", post(quotations::submit_quotation))
        .route("/api/quote-requests", post(vendors::send_quote_requests))
        .route("/api/intake", post(intake::submit_intake))
        .route("/api/stage", post(stage::update_stage))
        .route("/api/vendor-selection", post(vendor_actions::update_vendor_selection))
        .route("/api/negotiation", post(vendor_actions::update_negotiation))
        .route("/api/agreement", post(vendor_actions::update_agreement))
        .route("/api/vendor-approval", post(vendor_actions::update_vendor_approval))
        .route("/api/purchase-order", post(purchase_order::send_purchase_order))
        .route("/api/track", get(tracking::track))
        .with_state(ctx)
}
