//! CRUD integration tests.
//!
//! Tests verify:
//! - Create assigns an id and answers 201
//! - Create then get returns the same record
//! - Update changes only supplied fields
//! - Delete removes the product and later lookups fail with 404

use axum::http::{Method, StatusCode};
use serde_json::json;

use product_catalog::catalog::InMemoryProductStore;

use super::test_utils::{assert_error, lamp_payload, open_router, request, send};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let router = open_router(InMemoryProductStore::new());
    let (status, body) = send(&router, request(Method::GET, "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

// =============================================================================
// Create / Get
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_id() {
    let store = InMemoryProductStore::new();
    let router = open_router(store.clone());

    let (status, body) = send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["name"], "Desk Lamp");
    assert_eq!(body["inStock"], true);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let router = open_router(InMemoryProductStore::new());

    let (_, created) = send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(
        &router,
        request(Method::GET, &format!("/api/products/{}", id), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut expected = lamp_payload();
    expected["id"] = json!(id);
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn test_create_normalizes_string_in_stock() {
    let router = open_router(InMemoryProductStore::new());
    let mut payload = lamp_payload();
    payload["inStock"] = json!("false");

    let (status, body) = send(&router, request(Method::POST, "/api/products", Some(payload))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["inStock"], false);
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let router = open_router(InMemoryProductStore::new());
    let mut payload = lamp_payload();
    payload["id"] = json!("forged-id");

    let (_, body) = send(&router, request(Method::POST, "/api/products", Some(payload))).await;

    assert_ne!(body["id"], "forged-id");
}

#[tokio::test]
async fn test_create_appends_to_listing() {
    let router = open_router(InMemoryProductStore::with_sample_data());

    send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;

    let (_, body) = send(&router, request(Method::GET, "/api/products", None)).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"][2]["name"], "Desk Lamp");
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let router = open_router(InMemoryProductStore::with_sample_data());
    let id = "3f2b8c1e-0000-4000-8000-000000000000";

    let (status, body) = send(
        &router,
        request(Method::GET, &format!("/api/products/{}", id), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(
        &body,
        StatusCode::NOT_FOUND,
        &format!("Product with id {} not found", id),
    );
}

#[tokio::test]
async fn test_get_non_uuid_id_is_404() {
    let router = open_router(InMemoryProductStore::with_sample_data());

    let (status, body) = send(&router, request(Method::GET, "/api/products/42", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, StatusCode::NOT_FOUND, "Product with id 42 not found");
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let router = open_router(InMemoryProductStore::new());
    let (_, created) = send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(
        &router,
        request(Method::PUT, &uri, Some(json!({ "price": 24.5, "inStock": 0 }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["category"], created["category"]);
    assert_eq!(updated["price"], 24.5);
    assert_eq!(updated["inStock"], false);

    let (_, fetched) = send(&router, request(Method::GET, &uri, None)).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_with_empty_body_is_noop() {
    let router = open_router(InMemoryProductStore::new());
    let (_, created) = send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&router, request(Method::PUT, &uri, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_update_allows_empty_name() {
    let router = open_router(InMemoryProductStore::new());
    let (_, created) = send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&router, request(Method::PUT, &uri, Some(json!({ "name": "" })))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "");
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let router = open_router(InMemoryProductStore::with_sample_data());

    let (status, body) = send(
        &router,
        request(
            Method::PUT,
            "/api/products/missing",
            Some(json!({ "price": 1 })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, StatusCode::NOT_FOUND, "Product with id missing not found");
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let router = open_router(InMemoryProductStore::new());

    let (status, body) = send(
        &router,
        request(
            Method::PUT,
            "/api/products/missing",
            Some(json!({ "price": "free" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, StatusCode::BAD_REQUEST, "price must be a number");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let store = InMemoryProductStore::with_sample_data();
    let router = open_router(store.clone());
    let (_, created) = send(
        &router,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&router, request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": true, "product": created }));
    assert_eq!(store.len().await, 2);

    let (status, _) = send(&router, request(Method::GET, &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, request(Method::DELETE, &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stores_are_isolated_per_router() {
    let first = open_router(InMemoryProductStore::new());
    let second = open_router(InMemoryProductStore::new());

    send(
        &first,
        request(Method::POST, "/api/products", Some(lamp_payload())),
    )
    .await;

    let (_, body) = send(&second, request(Method::GET, "/api/products", None)).await;
    assert_eq!(body["total"], 0);
}
