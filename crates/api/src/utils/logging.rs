use std::time::Duration;

use procura_domain::{error_label, ProcuraError};
use tracing::{info, warn};

/// Log the outcome of one proxy operation with structured fields.
///
/// Keeps the handlers concise and the log shape consistent. `operation` is a
/// stable identifier like `"quotations::fetch"`; never forward user data in
/// it.
#[inline]
pub fn log_operation(
    operation: &str,
    elapsed: Duration,
    result: &Result<impl Sized, ProcuraError>,
) {
    let duration_ms = elapsed.as_millis() as u64;
    match result {
        Ok(_) => info!(operation, duration_ms, "operation_success"),
        Err(err) => {
            warn!(operation, duration_ms, error_type = error_label(err), "operation_failure");
        }
    }
}
