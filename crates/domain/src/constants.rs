//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Server defaults
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = ".procura";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Scripting endpoint envelope handling
pub const BODY_PREVIEW_LEN: usize = 200;

// Misplaced-price recovery bounds: a plausible price is a positive number
// below this ceiling that is not the row's phone number.
pub const PRICE_RECOVERY_CEILING: f64 = 10_000.0;

// Purchase order numbering
pub const PO_NUMBER_PREFIX: &str = "PO";
pub const PO_NUMBER_SUFFIX_LEN: usize = 6;

// Default quantity for purchase orders when the quotation omits it
pub const DEFAULT_PO_QUANTITY: u32 = 1;
