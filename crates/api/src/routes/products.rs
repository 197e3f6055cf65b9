//! Product catalog lookup

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::logging::log_operation;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductsQuery {
    pub search: Option<String>,
}

/// List product names, optionally filtered by a search term.
pub async fn fetch_products(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ProductsQuery>,
) -> ApiResult<Json<Value>> {
    let started = Instant::now();
    let result = ctx.service.search_products(query.search.as_deref()).await;
    log_operation("products::fetch", started.elapsed(), &result);

    let products = result?;
    Ok(Json(json!({"success": true, "products": products})))
}
