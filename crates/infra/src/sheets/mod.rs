//! Scripting-endpoint gateway
//!
//! The spreadsheet backend is fronted by a remote scripting endpoint with an
//! action-keyed JSON protocol. This module owns the URL building, envelope
//! normalization, and row mapping for every operation.

mod client;
mod envelope;

pub use client::SheetClient;
pub use envelope::parse_envelope;
