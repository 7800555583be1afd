//! Typed client for the external e-commerce REST backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local persistence, direct
//!   API calls through [`BackendClient`]
//! - Bearer-token authorization attached from the shared session store
//! - List responses are defensively normalized: the backend is
//!   inconsistent about envelope shapes (bare array, keyed object, or
//!   Spring-style page), see [`envelope`]
//! - No retries - callers decide
//!
//! # Endpoints
//!
//! ```text
//! GET    /v1/products?page&size        - Page<Product>
//! POST   /v1/products                  - multipart create
//! PUT    /v1/products/{id}             - multipart update
//! DELETE /v1/products/{id}
//! GET    /v1/products/{id}/images      - [ProductImage]
//! GET    /v1/categories                - [Category] (shape varies)
//! GET    /v1/orders?page&size          - ApiResponse<Page<Order>>
//! PATCH  /v1/orders/{id}/status?status= - ApiResponse<Order>
//! GET    /v1/users?page&size           - Page<Customer>
//! PATCH  /v1/users/{id}/role?id=&role= - Customer
//! GET    /v1/dashboard                 - ApiResponse<DashboardOverview>
//! GET    /v1/dashboard/sales/trend?period=&startDate=&endDate=
//! GET    /v1/dashboard/sales/top-products?limit=&period=
//! POST   /auth/login                   - {token, userId, role, ...}
//! GET    /auth/user                    - UserProfile
//! ```

mod analytics;
mod auth;
mod categories;
mod client;
mod customers;
pub mod envelope;
mod orders;
mod products;

pub use auth::LoginResponse;
pub use client::BackendClient;

use thiserror::Error;

/// Errors from the backend access layer.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request never reached the server (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body did not decode as the expected type.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A wrapped `ApiResponse` reported failure.
    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}

impl BackendError {
    /// HTTP status of the failure, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }
}
