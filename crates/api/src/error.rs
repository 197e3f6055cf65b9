//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use procura_domain::ProcuraError;
use serde_json::json;

/// Result alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper that renders a domain error as the `{success: false, error}`
/// envelope with the taxonomy's status code.
#[derive(Debug)]
pub struct ApiError(pub ProcuraError);

impl From<ProcuraError> for ApiError {
    fn from(err: ProcuraError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Shorthand for a 400 with a handler-specific message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(ProcuraError::Validation(message.into()))
    }

    fn status(&self) -> StatusCode {
        match &self.0 {
            ProcuraError::Validation(_) => StatusCode::BAD_REQUEST,
            ProcuraError::NotFound(_) => StatusCode::NOT_FOUND,
            ProcuraError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProcuraError::Config(_)
            | ProcuraError::Network(_)
            | ProcuraError::UpstreamProtocol(_)
            | ProcuraError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            ProcuraError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({"success": false, "error": self.message()}));
        (status, body).into_response()
    }
}
