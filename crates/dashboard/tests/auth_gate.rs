//! End-to-end tests for the token gate in front of the dashboard
//! routes: public paths, missing tokens, forged and expired tokens,
//! role restrictions, and the login/logout cookie lifecycle.

mod common;

use axum::body::Body;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    admin_token, app, customer_token, expired_token, forged_token, get_with_cookie, json_body,
    product_page_json, send, test_state,
};

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app(test_state("http://127.0.0.1:1"));

    let response = send(
        &app,
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_path_without_token_redirects_to_login() {
    let app = app(test_state("http://127.0.0.1:1"));

    let response = send(
        &app,
        Request::builder()
            .uri("/dashboard/products")
            .body(Body::empty())
            .expect("request"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_forged_token_is_cleared_and_redirected() {
    let app = app(test_state("http://127.0.0.1:1"));

    let response = get_with_cookie(&app, "/dashboard/products", &forged_token()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("clearing cookie");
    assert!(set_cookie.starts_with("jwt=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = app(test_state("http://127.0.0.1:1"));

    let response = get_with_cookie(&app, "/dashboard/products", &expired_token()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_customer_role_is_bounced_from_admin_screens() {
    let app = app(test_state("http://127.0.0.1:1"));

    let response = get_with_cookie(&app, "/dashboard/products", &customer_token()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_admin_token_reaches_admin_screen() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page_json(0, 10, 3)))
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));

    let response = get_with_cookie(&app, "/dashboard/products", &admin_token()).await;
    let body = json_body(response, StatusCode::OK).await;

    assert_eq!(body["items"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_login_sets_cookie_and_returns_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "backend-issued-token",
            "userId": "u-42",
            "role": "ADMIN",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "ada@example.com", "password": "hunter22"}).to_string(),
        ))
        .expect("request");
    let response = send(&app, request).await;

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("cookie")
        .to_string();
    assert!(set_cookie.starts_with("jwt=backend-issued-token"));
    assert!(set_cookie.contains("HttpOnly"));

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["id"], "u-42");
    assert_eq!(body["role"], "ADMIN");
}

#[tokio::test]
async fn test_login_rejects_malformed_email_without_backend_call() {
    // Port 1 would fail the request; validation must reject first.
    let app = app(test_state("http://127.0.0.1:1"));

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "not-an-email", "password": "hunter22"}).to_string(),
        ))
        .expect("request");
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = app(test_state("http://127.0.0.1:1"));

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .body(Body::empty())
        .expect("request");
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("cookie");
    assert!(set_cookie.contains("Max-Age=0"));
}
