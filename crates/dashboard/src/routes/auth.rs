//! Login and logout handlers.
//!
//! Login performs the structural checks locally, authenticates against
//! the backend, then installs the token in both channels at once: the
//! `jwt` cookie the gate reads and the session store the backend client
//! reads. Keeping one code path for both is what prevents the two from
//! drifting apart.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use shopdeck_core::{UserProfile, validate_login};

use crate::auth::{clear_jwt_cookie, set_jwt_cookie};
use crate::error::{AppError, Result};
use crate::session::AuthSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// POST /login
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Response> {
    validate_login(&form.email, &form.password)?;

    let login = state.backend().login(&form.email, &form.password).await?;
    let profile: UserProfile = login.profile();

    state
        .session()
        .set(AuthSession::new(
            SecretString::from(login.token.clone()),
            profile.clone(),
        ))
        .await;

    tracing::info!(user_id = %profile.id, role = %profile.role, "Login succeeded");

    let mut response = (StatusCode::OK, Json(profile)).into_response();
    let cookie = HeaderValue::from_str(&set_jwt_cookie(&login.token))
        .map_err(|e| AppError::Internal(format!("cookie encoding failed: {e}")))?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// POST /logout
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Response> {
    state.session().clear().await;

    let mut response = StatusCode::NO_CONTENT.into_response();
    let cookie = HeaderValue::from_str(&clear_jwt_cookie())
        .map_err(|e| AppError::Internal(format!("cookie encoding failed: {e}")))?;
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
