//! Conversions from external infrastructure errors into domain errors.

use procura_domain::ProcuraError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ProcuraError);

impl From<InfraError> for ProcuraError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ProcuraError> for InfraError {
    fn from(value: ProcuraError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let message = if value.is_timeout() {
            "request timed out".to_string()
        } else if value.is_connect() {
            format!("connection failed: {value}")
        } else if value.is_decode() {
            return InfraError(ProcuraError::UpstreamProtocol(format!(
                "failed to decode response body: {value}"
            )));
        } else {
            value.to_string()
        };
        InfraError(ProcuraError::Network(message))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(ProcuraError::Internal(format!("io error: {value}")))
    }
}
