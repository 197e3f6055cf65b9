//! Liveness probe

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({"success": true, "status": "ok"}))
}
