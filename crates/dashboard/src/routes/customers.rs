//! Customer screen handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use shopdeck_core::{Customer, CustomerId, Role};

use crate::controller::ListView;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
}

/// GET /dashboard/customers
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListView<Customer>>> {
    let screen = state.screens().customers();

    if let Some(page) = query.page {
        screen.set_page(page).await;
    }

    Ok(Json(screen.load().await))
}

#[derive(Debug, Deserialize)]
pub struct RoleChange {
    pub role: String,
}

/// PATCH /dashboard/customers/{id}/role
#[instrument(skip(state))]
pub async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(change): Json<RoleChange>,
) -> Result<Json<Customer>> {
    let role: Role = change
        .role
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown role: {}", change.role)))?;

    let backend = state.backend().clone();
    let customer = state
        .cache()
        .mutate(&["customers"], async move {
            backend.change_customer_role(&id, role).await
        })
        .await?;

    Ok(Json(customer))
}
