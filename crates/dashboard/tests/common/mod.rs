//! Shared helpers for the dashboard integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::header::COOKIE;
use axum::http::{Request, Response, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use shopdeck_dashboard::routes;
use shopdeck_dashboard::state::AppState;
use shopdeck_dashboard::config::DashboardConfig;

/// HMAC secret shared by the app under test and the token factory.
pub const JWT_SECRET: &str = "integration-suite-secret-0123456789abcdef";

pub const PAGE_SIZE: u32 = 10;

/// Build an app state pointed at the given mock backend.
pub fn test_state(backend_url: &str) -> AppState {
    let config = DashboardConfig {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        backend_url: Url::parse(backend_url).expect("backend url"),
        jwt_secret: SecretString::from(JWT_SECRET),
        page_size: PAGE_SIZE,
        sentry_dsn: None,
        sentry_environment: None,
    };
    AppState::new(config)
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    role: String,
    exp: i64,
}

fn signed_token(secret: &str, role: &str, exp: i64) -> String {
    encode(
        &Header::default(),
        &TestClaims {
            sub: "u-1".to_string(),
            role: role.to_string(),
            exp,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token")
}

fn future_exp() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

pub fn admin_token() -> String {
    signed_token(JWT_SECRET, "ADMIN", future_exp())
}

pub fn customer_token() -> String {
    signed_token(JWT_SECRET, "CUSTOMER", future_exp())
}

pub fn expired_token() -> String {
    signed_token(JWT_SECRET, "ADMIN", chrono::Utc::now().timestamp() - 3600)
}

pub fn forged_token() -> String {
    signed_token("a-completely-different-signing-secret!!", "ADMIN", future_exp())
}

/// Issue one request against the router and return the response.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn get_with_cookie(app: &Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(COOKIE, format!("jwt={token}"))
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

/// Decode a JSON response body, asserting the expected status first.
pub async fn json_body(response: Response<Body>, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// A Spring-style page envelope holding `total` sequential products.
pub fn product_page_json(page: u32, size: u32, total: u64) -> Value {
    let start = u64::from(page) * u64::from(size);
    let end = (start + u64::from(size)).min(total);
    let content: Vec<Value> = (start..end).map(product_json).collect();

    serde_json::json!({
        "content": content,
        "totalPages": total.div_ceil(u64::from(size)),
        "totalElements": total,
        "number": page,
        "size": size,
    })
}

pub fn product_json(n: u64) -> Value {
    serde_json::json!({
        "id": format!("p-{n}"),
        "name": format!("Product {n}"),
        "description": "A perfectly ordinary product left in the catalog",
        "price": "19.99",
        "category": "kitchen",
        "quantity": 5,
    })
}

/// Minimal multipart body for a valid product create/update.
pub fn product_multipart_body(boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [
        ("name", "Stock pot"),
        ("description", "A twelve quart stainless stock pot"),
        ("price", "49.99"),
        ("quantity", "3"),
        ("category", "kitchen"),
    ] {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"images\"; \
             filename=\"pot.png\"\r\nContent-Type: image/png\r\n\r\n\u{89}PNG\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
