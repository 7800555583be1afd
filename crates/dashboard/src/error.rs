//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`. Nothing here is fatal to the process - every
//! error renders as a degraded response or a redirect.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use shopdeck_core::ValidationError;

use crate::auth::AuthError;
use crate::backend::BackendError;

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Client-side form constraint violation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Backend(backend) => match backend.status() {
                // Pass auth and not-found statuses through so the
                // screen can react; everything else from the backend
                // is a gateway failure from the dashboard's viewpoint.
                Some(StatusCode::NOT_FOUND) => StatusCode::NOT_FOUND,
                Some(StatusCode::UNAUTHORIZED) => StatusCode::UNAUTHORIZED,
                Some(StatusCode::FORBIDDEN) => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        if matches!(self, Self::Backend(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        let status = self.status();

        // Validation errors carry per-field detail for inline display;
        // internal details are never exposed to clients.
        let body = match &self {
            Self::Validation(ValidationError(fields)) => serde_json::json!({
                "error": "validation failed",
                "fields": fields,
            }),
            Self::Backend(_) | Self::Internal(_) => serde_json::json!({
                "error": "upstream error"
            }),
            other => serde_json::json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::sync::Arc<BackendError>> for AppError {
    /// Cache-shared errors lose their payload identity; keep the
    /// message and status.
    fn from(err: std::sync::Arc<BackendError>) -> Self {
        match err.as_ref() {
            BackendError::Http { status, body } => Self::Backend(BackendError::Http {
                status: *status,
                body: body.clone(),
            }),
            other => Self::Backend(BackendError::Rejected(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use shopdeck_core::FieldError;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::NotFound("p-1".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation(ValidationError(vec![])).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_status_passthrough() {
        let not_found = AppError::Backend(BackendError::Http {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let server_err = AppError::Backend(BackendError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        });
        assert_eq!(server_err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_body_carries_fields() {
        let err = AppError::Validation(ValidationError(vec![FieldError {
            field: "name",
            message: "too short".into(),
        }]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
