//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Procura
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ProcuraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The scripting endpoint answered with something that is not the JSON
    /// envelope we expect (HTML error pages, plain text, truncated bodies).
    /// Carries a bounded preview of the raw body.
    #[error("Invalid response from scripting endpoint: {0}")]
    UpstreamProtocol(String),

    /// The scripting endpoint returned an HTTP error or a `success: false`
    /// payload. The upstream status and message pass through to the caller.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Procura operations
pub type Result<T> = std::result::Result<T, ProcuraError>;

impl ProcuraError {
    /// Build an upstream business error from a status code and message.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream { status, message: message.into() }
    }
}

/// Convert a `ProcuraError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &ProcuraError) -> &'static str {
    match error {
        ProcuraError::Config(_) => "config",
        ProcuraError::Validation(_) => "validation",
        ProcuraError::Network(_) => "network",
        ProcuraError::UpstreamProtocol(_) => "upstream_protocol",
        ProcuraError::Upstream { .. } => "upstream",
        ProcuraError::NotFound(_) => "not_found",
        ProcuraError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_carries_status_and_message() {
        let err = ProcuraError::upstream(502, "script unavailable");
        match &err {
            ProcuraError::Upstream { status, message } => {
                assert_eq!(*status, 502);
                assert_eq!(message, "script unavailable");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert_eq!(error_label(&err), "upstream");
    }

    #[test]
    fn errors_serialize_with_tagged_form() {
        let err = ProcuraError::Config("PROCURA_SCRIPT_URL is not set".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "PROCURA_SCRIPT_URL is not set");
    }
}
