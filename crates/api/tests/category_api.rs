//! HTTP-level integration tests for the categories endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use common::{authorized, body_json, create_category, create_product, delete, get, post_json, send};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_category_returns_201_with_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/categories", json!({"name": "Garden"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_categories_ordered_by_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    for name in ["Toys", "Books", "Garden"] {
        create_category(&app, name).await;
    }

    let response = get(app, "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Books", "Garden", "Toys"]);
    assert!(json[0]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_category_name_is_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_category(&app, "Books").await;

    let response = post_json(app, "/api/categories", json!({"name": "Books"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"]["name"][0], "Category name 'Books' already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_names_differing_in_case_are_distinct(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_category(&app, "Books").await;

    let response = post_json(app, "/api/categories", json!({"name": "books"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_category_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/categories", json!({"name": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"][0], "Name is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_whitespace_only_category_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/categories", json!({"name": "   "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"][0], "Name is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_category_id_is_json_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/categories/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = authorized(Method::POST, "/api/categories")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_empty_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_category(&app, "Empty").await;

    let response = delete(app.clone(), &format!("/api/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app, &format!("/api/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/categories/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Category with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_category_with_products_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_category(&app, "Clothing").await;
    create_product(&app, "CLOT001", "T-Shirt", 19.99, id).await;

    let response = delete(app.clone(), &format!("/api/categories/{id}")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("Clothing"));

    // Still listed.
    let json = body_json(get(app, "/api/categories").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}
