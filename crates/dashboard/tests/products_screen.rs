//! Product screen round trips against a mocked backend: caching,
//! paging, envelope tolerance, and the create/delete invalidation
//! cycle.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    admin_token, app, get_with_cookie, json_body, product_json, product_multipart_body,
    product_page_json, send, test_state,
};

#[tokio::test]
async fn test_repeat_list_requests_hit_backend_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page_json(0, 10, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));
    let token = admin_token();

    for _ in 0..3 {
        let response = get_with_cookie(&app, "/dashboard/products", &token).await;
        let body = json_body(response, StatusCode::OK).await;
        assert_eq!(body["items"].as_array().map(Vec::len), Some(5));
    }
}

#[tokio::test]
async fn test_paging_across_a_25_item_catalog() {
    let server = MockServer::start().await;
    for page in 0..3u32 {
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(product_page_json(page, 10, 25)),
            )
            .mount(&server)
            .await;
    }

    let app = app(test_state(&server.uri()));
    let token = admin_token();

    let response = get_with_cookie(&app, "/dashboard/products", &token).await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["pageIndex"], 0);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(10));

    let response = get_with_cookie(&app, "/dashboard/products?page=2", &token).await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["pageIndex"], 2);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(5));

    // Out of range: the screen stays where it was.
    let response = get_with_cookie(&app, "/dashboard/products?page=7", &token).await;
    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["pageIndex"], 2);
}

#[tokio::test]
async fn test_bare_array_envelope_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(0), product_json(1)])),
        )
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));

    let response = get_with_cookie(&app, "/dashboard/products", &admin_token()).await;
    let body = json_body(response, StatusCode::OK).await;

    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["totalElements"], 2);
}

#[tokio::test]
async fn test_create_invalidates_the_cached_list() {
    let server = MockServer::start().await;
    // The first list fetch serves the pre-create page; after the
    // mutation invalidates the entry, the refetch sees the new product.
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page_json(0, 10, 5)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    let mut created_page = product_page_json(0, 10, 5);
    created_page["content"]
        .as_array_mut()
        .expect("content")
        .push(product_json(99));
    created_page["totalElements"] = json!(6);
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_page))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json(99)))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));
    let token = admin_token();

    let response = get_with_cookie(&app, "/dashboard/products", &token).await;
    json_body(response, StatusCode::OK).await;

    let boundary = "test-boundary-7f2a";
    let request = Request::builder()
        .method("POST")
        .uri("/dashboard/products")
        .header("cookie", format!("jwt={token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(product_multipart_body(boundary)))
        .expect("request");
    let response = send(&app, request).await;
    let body = json_body(response, StatusCode::CREATED).await;
    assert_eq!(body["product"]["id"], "p-99");
    assert_eq!(body["rejectedImages"], 0);

    let response = get_with_cookie(&app, "/dashboard/products", &token).await;
    let body = json_body(response, StatusCode::OK).await;
    let new_rows = body["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter(|row| row["id"] == "p-99")
        .count();
    assert_eq!(new_rows, 1, "created product listed exactly once");
    assert_eq!(body["totalElements"], 6);
}

#[tokio::test]
async fn test_product_create_refreshes_categories() {
    // A write can introduce a category, so the cached category list is
    // invalidated along with the product pages.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "c-1", "name": "kitchen"}])),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json(99)))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));
    let token = admin_token();

    json_body(
        get_with_cookie(&app, "/dashboard/categories", &token).await,
        StatusCode::OK,
    )
    .await;

    let boundary = "test-boundary-3c8d";
    let request = Request::builder()
        .method("POST")
        .uri("/dashboard/products")
        .header("cookie", format!("jwt={token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(product_multipart_body(boundary)))
        .expect("request");
    json_body(send(&app, request).await, StatusCode::CREATED).await;

    json_body(
        get_with_cookie(&app, "/dashboard/categories", &token).await,
        StatusCode::OK,
    )
    .await;
}

#[tokio::test]
async fn test_invalid_form_is_rejected_before_the_backend() {
    // Bad price format never reaches the backend; port 1 would fail.
    let app = app(test_state("http://127.0.0.1:1"));
    let token = admin_token();

    let boundary = "test-boundary-9b1c";
    let mut body = Vec::new();
    for (name, value) in [
        ("name", "x"), // too short
        ("description", "too short"),
        ("price", "0"),
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
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/dashboard/products")
        .header("cookie", format!("jwt={token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request");
    let response = send(&app, request).await;

    let body = json_body(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .expect("fields")
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"price"));
}

#[tokio::test]
async fn test_double_delete_is_404_and_leaves_cache_intact() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/products/p-9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;
    // A failed mutation publishes no invalidation, so the list stays
    // cached across both delete attempts.
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page_json(0, 10, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));
    let token = admin_token();

    json_body(
        get_with_cookie(&app, "/dashboard/products", &token).await,
        StatusCode::OK,
    )
    .await;

    for _ in 0..2 {
        let request = Request::builder()
            .method("DELETE")
            .uri("/dashboard/products/p-9")
            .header("cookie", format!("jwt={token}"))
            .body(Body::empty())
            .expect("request");
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    json_body(
        get_with_cookie(&app, "/dashboard/products", &token).await,
        StatusCode::OK,
    )
    .await;
}

#[tokio::test]
async fn test_show_returns_the_single_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/p-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(3)))
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));

    let response = get_with_cookie(&app, "/dashboard/products/p-3", &admin_token()).await;
    let body = json_body(response, StatusCode::OK).await;

    assert_eq!(body["id"], "p-3");
    assert_eq!(body["name"], "Product 3");
}

#[tokio::test]
async fn test_images_are_served_as_data_uris() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/p-1/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "i-1", "productId": "p-1", "imageData": "QUJD"},
            {"id": "i-2", "productId": "p-1", "imageData": "data:image/png;base64,REVG"},
        ])))
        .mount(&server)
        .await;

    let app = app(test_state(&server.uri()));

    let response = get_with_cookie(&app, "/dashboard/products/p-1/images", &admin_token()).await;
    let body = json_body(response, StatusCode::OK).await;

    assert_eq!(body[0]["dataUri"], "data:image/jpeg;base64,QUJD");
    // Already-prefixed data is passed through untouched.
    assert_eq!(body[1]["dataUri"], "data:image/png;base64,REVG");
}
