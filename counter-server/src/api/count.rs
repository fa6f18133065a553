//! Order-count endpoint

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use http::{HeaderMap, HeaderValue, header};
use serde::{Deserialize, Serialize};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::AppError;
use crate::state::AppState;
use crate::strategy;

/// Shared/edge cache directive for count responses
const CACHE_CONTROL: &str = "s-maxage=15, stale-while-revalidate=30";

/// Header a storefront app proxy uses to declare the originating shop
const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";

/// Count route - public, edge-cacheable
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/order-count", get(order_count).post(order_count))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL),
        ))
}

#[derive(Debug, Default, Deserialize)]
pub struct CountQuery {
    /// Pass-through order status override (`any`, `open`, `closed`, ...)
    pub status: Option<String>,
    pub created_at_min: Option<String>,
    pub created_at_max: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// One linear sequence: origin check, config check, window resolution,
/// strategy evaluation, terminal response. Upstream calls happen inside
/// the strategy, sequentially.
pub async fn order_count(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CountQuery>,
) -> Result<Json<CountResponse>, AppError> {
    // Configuration first: absent variables are always reported as such,
    // even when origin enforcement would also reject the request.
    let missing = state.config.missing_vars();
    if !missing.is_empty() {
        return Err(AppError::MissingConfig(missing));
    }

    if state.config.enforce_shop_origin
        && let Some(declared) = headers.get(SHOP_DOMAIN_HEADER).and_then(|v| v.to_str().ok())
        && state.config.shop_domain.as_deref() != Some(declared)
    {
        return Err(AppError::ShopOriginMismatch);
    }
    let api = state
        .shopify
        .as_deref()
        .ok_or_else(|| AppError::Internal("upstream client not initialized".into()))?;

    let mut window = state.config.window.resolve(Utc::now());
    window.apply_overrides(query.created_at_min.as_deref(), query.created_at_max.as_deref());

    let count = strategy::evaluate(api, &state.config, &window, query.status.as_deref()).await?;
    tracing::debug!(strategy = %state.config.strategy, count, "count computed");

    Ok(Json(CountResponse { count }))
}
