//! HTTP route handlers for the dashboard service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//!
//! # Auth
//! POST /login                           - Authenticate, set jwt cookie
//! POST /logout                          - Clear session and cookie
//!
//! # Dashboard (authenticated; admin for the resource screens)
//! GET    /dashboard                     - Profile summary
//! GET    /dashboard/overview            - Analytics overview payload
//! GET    /dashboard/sales/trend         - Sales trend points
//! GET    /dashboard/sales/top-products  - Best-selling products
//! GET    /dashboard/products            - Product list view-model
//! POST   /dashboard/products            - Create product (multipart)
//! GET    /dashboard/products/{id}       - Single product (edit screen)
//! PUT    /dashboard/products/{id}       - Update product (multipart)
//! DELETE /dashboard/products/{id}       - Delete product
//! GET    /dashboard/products/{id}/images - Product images as data URIs
//! GET    /dashboard/orders              - Order list view-model
//! PATCH  /dashboard/orders/{id}/status  - Change order status
//! GET    /dashboard/customers           - Customer list view-model
//! PATCH  /dashboard/customers/{id}/role - Change customer role
//! GET    /dashboard/categories          - Category list
//! ```
//!
//! Every `/dashboard` route sits behind the token gate middleware; the
//! resource screens are additionally admin-only there.

pub mod analytics;
pub mod auth;
pub mod customers;
pub mod orders;
pub mod products;
pub mod profile;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use shopdeck_core::{MAX_IMAGE_BYTES, MAX_IMAGES_PER_PRODUCT};

use crate::auth::authorize;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/{id}/images", get(products::images))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/status", patch(orders::change_status))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index))
        .route("/{id}/role", patch(customers::change_role))
}

/// Create the dashboard routes router (gated).
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::summary))
        .route("/overview", get(analytics::overview))
        .route("/sales/trend", get(analytics::sales_trend))
        .route("/sales/top-products", get(analytics::top_products))
        .route("/categories", get(profile::categories))
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/customers", customer_routes())
}

/// Assemble the full application router with the gate installed.
///
/// Sentry layers are added in `main` so tests get the same router
/// without a Sentry hub.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .nest("/dashboard", dashboard_routes())
        .layer(from_fn_with_state(state.clone(), authorize))
        .layer(TraceLayer::new_for_http())
        // A full product form can legitimately carry ten images at the
        // per-file cap; leave headroom for the scalar fields.
        .layer(DefaultBodyLimit::max(
            MAX_IMAGE_BYTES * MAX_IMAGES_PER_PRODUCT + 1024 * 1024,
        ))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
