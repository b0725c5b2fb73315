#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use inventory_core::api_keys::{hash_api_key, API_KEY_HEADER};
use sqlx::PgPool;
use tower::ServiceExt;

use inventory_api::config::{LogFormat, ServerConfig};
use inventory_api::router::build_app_router;
use inventory_api::state::AppState;

/// API key accepted by [`test_config`].
pub const TEST_API_KEY: &str = "test-api-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// The write limit is high enough that ordinary tests never hit it.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: "test".to_string(),
        api_key_hash: hash_api_key(TEST_API_KEY),
        write_rate_limit: 1_000,
        write_rate_window_secs: 60,
        seed_demo_data: false,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over `pool` with [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the full application router with a custom config.
///
/// Clones of the returned router share the same state, including the
/// write rate limiter.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Request builder with JSON content type and the test API key.
pub fn authorized(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header(API_KEY_HEADER, TEST_API_KEY)
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = authorized(Method::POST, uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = authorized(Method::PUT, uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = authorized(Method::DELETE, uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a category through the API and return its id.
pub async fn create_category(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating category {name}");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a product through the API and return its id.
pub async fn create_product(
    app: &Router,
    sku: &str,
    name: &str,
    price: f64,
    category_id: i64,
) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/products",
        product_body(sku, name, price, 5, category_id),
    )
    .await;
    assert_eq!(response.status(), 201, "creating product {sku}");
    body_json(response).await["id"].as_i64().unwrap()
}

pub fn product_body(
    sku: &str,
    name: &str,
    price: f64,
    quantity: i64,
    category_id: i64,
) -> serde_json::Value {
    serde_json::json!({
        "sku": sku,
        "name": name,
        "price": price,
        "quantity": quantity,
        "categoryId": category_id,
    })
}
