//! Upstream response envelope normalization

use procura_domain::constants::BODY_PREVIEW_LEN;
use procura_domain::{ProcuraError, Result};
use serde_json::Value;

/// Normalize one upstream response into its JSON payload.
///
/// - Non-JSON bodies (the script's HTML error pages, deployment notices)
///   become [`ProcuraError::UpstreamProtocol`] with a bounded preview.
/// - HTTP errors pass the upstream status and message through.
/// - A 2xx `{success: false}` payload is an upstream business error; those
///   surface as 500 because the script reports its own failures that way.
pub fn parse_envelope(status: u16, content_type: Option<&str>, body: &str) -> Result<Value> {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Err(ProcuraError::UpstreamProtocol(preview(body)));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|_| ProcuraError::UpstreamProtocol(preview(body)))?;

    let explicit_failure = value.get("success").and_then(Value::as_bool) == Some(false);

    if !(200..300).contains(&status) {
        return Err(ProcuraError::Upstream { status, message: error_message(&value) });
    }
    if explicit_failure {
        return Err(ProcuraError::Upstream { status: 500, message: error_message(&value) });
    }

    Ok(value)
}

fn error_message(value: &Value) -> String {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "scripting endpoint returned an error".to_string())
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_PREVIEW_LEN {
        trimmed.to_string()
    } else {
        trimmed.chars().take(BODY_PREVIEW_LEN).collect()
    }
}
