//! Order screen handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopdeck_core::{Order, OrderId, OrderItem, OrderStatus};

use crate::controller::ListView;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// One order line, with its total already computed for the table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub line_total: Decimal,
}

impl From<OrderItem> for OrderLineView {
    fn from(item: OrderItem) -> Self {
        let line_total = item.line_total();
        Self {
            id: item.id,
            product_id: item.product_id.to_string(),
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            line_total,
        }
    }
}

/// Order row for the table: the raw record plus the derived numbers
/// the screen renders directly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub user_id: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub item_count: usize,
    pub items: Vec<OrderLineView>,
    pub shipping_address: String,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            user_id: order.user_id,
            order_date: order.order_date,
            status: order.status,
            total_amount: order.total_amount,
            item_count: order.items.len(),
            items: order.items.into_iter().map(OrderLineView::from).collect(),
            shipping_address: order.shipping_address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
}

/// GET /dashboard/orders
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListView<OrderView>>> {
    let screen = state.screens().orders();

    if let Some(page) = query.page {
        screen.set_page(page).await;
    }

    Ok(Json(screen.load().await.map(OrderView::from)))
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// PATCH /dashboard/orders/{id}/status
#[instrument(skip(state))]
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(change): Json<StatusChange>,
) -> Result<Json<OrderView>> {
    let status: OrderStatus = change
        .status
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown order status: {}", change.status)))?;

    let backend = state.backend().clone();
    let order = state
        .cache()
        .mutate(&["orders"], async move {
            backend.change_order_status(&id, status).await
        })
        .await?;

    Ok(Json(OrderView::from(order)))
}
