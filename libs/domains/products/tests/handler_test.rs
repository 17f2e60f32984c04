//! Handler tests for Products domain
//!
//! These tests drive the products router with the in-memory repository:
//! - Request decoding and validation
//! - Response serialization
//! - HTTP status codes
//! - Error bodies
//!
//! The JWT gate is not mounted here; the authenticated user is injected
//! as a request extension the way the gate would.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::{AuthenticatedUser, ErrorResponse};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: InMemoryProductRepository) -> Router {
    let user = AuthenticatedUser {
        user_id: TestDataBuilder::from_test_name("products_handler").id(),
    };
    handlers::router(ProductService::new(repo)).layer(Extension(user))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn seed(repo: &InMemoryProductRepository, name: &str, price: f64) -> Product {
    repo.create(Product::new(name, price).unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app(InMemoryProductRepository::new());
    let name = TestDataBuilder::from_test_name("products_create").name("lamp", "desk");

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": name, "price": 25 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, name);
    assert_eq!(product.price, 25.0);
    assert_eq!(product.id.get_version_num(), 7);
}

#[tokio::test]
async fn test_create_product_requires_price() {
    let app = app(InMemoryProductRepository::new());

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "Lamp" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert_eq!(error.message, "price is required");
    assert_eq!(error.details, Some(json!({ "kind": "price_required" })));
}

#[tokio::test]
async fn test_create_product_rejects_negative_price() {
    let app = app(InMemoryProductRepository::new());

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "Lamp", "price": -3.5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "invalid price");
}

#[tokio::test]
async fn test_create_product_malformed_body() {
    let app = app(InMemoryProductRepository::new());

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_product_without_identity_is_401() {
    let app = handlers::router(ProductService::new(InMemoryProductRepository::new()));

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "Lamp", "price": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_product_roundtrip() {
    let repo = InMemoryProductRepository::new();
    let stored = seed(&repo, "Chair", 40.0).await;
    let app = app(repo);

    let response = app
        .oneshot(get(&format!("/{}", stored.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product, stored);
}

#[tokio::test]
async fn test_get_product_invalid_uuid() {
    let app = app(InMemoryProductRepository::new());

    let response = app.oneshot(get("/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_UUID");
}

#[tokio::test]
async fn test_get_product_not_found() {
    let app = app(InMemoryProductRepository::new());
    let id = Uuid::now_v7();

    let response = app.oneshot(get(&format!("/{id}"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "NOT_FOUND");
    assert_eq!(error.message, format!("Product {id} not found"));
}

#[tokio::test]
async fn test_update_product_replaces_fields() {
    let repo = InMemoryProductRepository::new();
    let stored = seed(&repo, "Chair", 40.0).await;
    let app = app(repo);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", stored.id),
            json!({ "name": "Armchair", "price": 55.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, stored.id);
    assert_eq!(product.created_at, stored.created_at);
    assert_eq!(product.name, "Armchair");
    assert_eq!(product.price, 55.5);
}

#[tokio::test]
async fn test_update_missing_product_is_404_before_validation() {
    let app = app(InMemoryProductRepository::new());

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", Uuid::now_v7()),
            json!({ "name": "", "price": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_validates_replacement() {
    let repo = InMemoryProductRepository::new();
    let stored = seed(&repo, "Chair", 40.0).await;
    let app = app(repo.clone());

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", stored.id),
            json!({ "name": "", "price": 10 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "name is required");

    // Nothing was written
    assert_eq!(repo.find_by_id(stored.id).await.unwrap(), stored);
}

#[tokio::test]
async fn test_delete_product_then_404() {
    let repo = InMemoryProductRepository::new();
    let stored = seed(&repo, "Chair", 40.0).await;
    let app = app(repo);

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/{}", stored.id))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get(&format!("/{}", stored.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_defaults() {
    let repo = InMemoryProductRepository::new();
    for i in 1..=12 {
        seed(&repo, &format!("Product {i}"), i as f64).await;
    }
    let app = app(repo);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 10);
    assert_eq!(products[0].name, "Product 1");
    assert_eq!(products[1].name, "Product 10");
}

#[tokio::test]
async fn test_list_products_descending_page() {
    let repo = InMemoryProductRepository::new();
    for name in ["apple", "banana", "cherry"] {
        seed(&repo, name, 1.0).await;
    }
    let app = app(repo);

    let response = app
        .oneshot(get("/?page=1&limit=2&sort=desc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["cherry", "banana"]);
}

#[tokio::test]
async fn test_list_products_limit_out_of_range() {
    let app = app(InMemoryProductRepository::new());

    let response = app.oneshot(get("/?limit=101")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_products_undecodable_query() {
    let app = app(InMemoryProductRepository::new());

    for uri in ["/?page=abc", "/?sort=sideways"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let error: ErrorResponse = json_body(response.into_body()).await;
        assert_eq!(error.error, "INVALID_QUERY", "{uri}");
    }
}
