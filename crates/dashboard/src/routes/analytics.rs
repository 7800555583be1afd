//! Dashboard analytics handlers: overview cards, the sales trend
//! chart, and the top-products table.
//!
//! The numbers are aggregated by the backend; these handlers only
//! proxy them through the cache. Keys live under the `dashboard`
//! prefix and expire by idle timeout - no mutation in this service
//! invalidates them.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use shopdeck_core::{DashboardOverview, ProductPerformance, SalesPoint, TrendPeriod};

use crate::cache::QueryKey;
use crate::error::{AppError, Result};
use crate::state::AppState;

const DEFAULT_TOP_PRODUCTS: u32 = 5;
const MAX_TOP_PRODUCTS: u32 = 50;

/// GET /dashboard/overview
#[instrument(skip(state))]
pub async fn overview(State(state): State<AppState>) -> Result<Json<DashboardOverview>> {
    let backend = state.backend().clone();
    let overview = state
        .cache()
        .query(QueryKey::bare("dashboard:overview"), || async move {
            backend.dashboard_overview().await
        })
        .await?;

    Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub period: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// GET /dashboard/sales/trend
#[instrument(skip(state))]
pub async fn sales_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<SalesPoint>>> {
    let period = match query.period.as_deref() {
        None => TrendPeriod::Daily,
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("unknown trend period: {raw}")))?,
    };

    let mut params = vec![("period", period.as_str())];
    if let Some(start) = query.start_date.as_deref() {
        params.push(("start", start));
    }
    if let Some(end) = query.end_date.as_deref() {
        params.push(("end", end));
    }
    let key = QueryKey::params("dashboard:trend", params);

    let backend = state.backend().clone();
    let start = query.start_date.clone();
    let end = query.end_date.clone();
    let trend = state
        .cache()
        .query(key, || async move {
            backend
                .sales_trend(period, start.as_deref(), end.as_deref())
                .await
        })
        .await?;

    Ok(Json(trend))
}

#[derive(Debug, Deserialize)]
pub struct TopProductsQuery {
    pub limit: Option<u32>,
    pub period: Option<String>,
}

/// GET /dashboard/sales/top-products
#[instrument(skip(state))]
pub async fn top_products(
    State(state): State<AppState>,
    Query(query): Query<TopProductsQuery>,
) -> Result<Json<Vec<ProductPerformance>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_TOP_PRODUCTS)
        .clamp(1, MAX_TOP_PRODUCTS);
    let period = match query.period.as_deref() {
        None => None,
        Some(raw) => Some(raw.parse::<TrendPeriod>().map_err(|_| {
            AppError::BadRequest(format!("unknown trend period: {raw}"))
        })?),
    };

    let limit_str = limit.to_string();
    let mut params = vec![("limit", limit_str.as_str())];
    if let Some(period) = period {
        params.push(("period", period.as_str()));
    }
    let key = QueryKey::params("dashboard:top-products", params);

    let backend = state.backend().clone();
    let products = state
        .cache()
        .query(key, || async move {
            backend.top_products(limit, period).await
        })
        .await?;

    Ok(Json(products))
}
