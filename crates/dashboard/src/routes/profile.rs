//! Dashboard landing handlers: profile summary and categories.

use axum::extract::State;
use axum::Json;
use tracing::instrument;

use shopdeck_core::{Category, UserProfile};

use crate::cache::QueryKey;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// GET /dashboard
///
/// Serves the profile from the session when present; falls back to the
/// backend for a freshly gated request whose session predates a
/// restart.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<UserProfile>> {
    if let Some(profile) = state.session().profile().await {
        return Ok(Json(profile));
    }

    let profile = state
        .backend()
        .current_user()
        .await
        .map_err(|_| AppError::Auth(crate::auth::AuthError::MissingToken))?;
    Ok(Json(profile))
}

/// GET /dashboard/categories
///
/// Categories change rarely, so they are cached under a bare key and
/// invalidated alongside products.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let backend = state.backend().clone();
    let categories = state
        .cache()
        .query(QueryKey::bare("categories"), || async move {
            backend.list_categories().await
        })
        .await?;

    Ok(Json(categories))
}
