//! Request logger integration tests.
//!
//! Tests verify:
//! - One access-log line per request, whatever the outcome
//! - The line carries the method and the path with its query string
//! - Requests pass through the logger unchanged

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};

use product_catalog::catalog::InMemoryProductStore;

use super::test_utils::{capture_logs, lamp_payload, protected_router, request, send};

const TEST_KEY: &str = "abc";

fn access_lines(lines: &[String]) -> Vec<&String> {
    lines.iter().filter(|l| l.contains("method=")).collect()
}

#[tokio::test]
async fn test_logs_every_request_once() {
    let (logs, _guard) = capture_logs();
    let router = protected_router(InMemoryProductStore::with_sample_data(), TEST_KEY);

    let authorized = Request::builder()
        .method(Method::GET)
        .uri("/api/products?page=2&limit=1")
        .header("x-api-key", TEST_KEY)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, authorized).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, request(Method::GET, "/api/products/stats", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&router, request(Method::DELETE, "/nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let lines = logs.lines();
    let access = access_lines(&lines);
    assert_eq!(access.len(), 3, "log lines: {:?}", lines);

    assert!(access[0].contains("] GET /api/products?page=2&limit=1"));
    assert!(access[1].contains("] GET /api/products/stats"));
    assert!(access[2].contains("] DELETE /nowhere"));
    assert!(access.iter().all(|l| l.contains("INFO")));
}

#[tokio::test]
async fn test_log_line_starts_with_utc_timestamp() {
    let (logs, _guard) = capture_logs();
    let router = protected_router(InMemoryProductStore::new(), "");

    send(&router, request(Method::GET, "/health", None)).await;

    let lines = logs.lines();
    let access = access_lines(&lines);
    assert_eq!(access.len(), 1);

    let line = access[0];
    let start = line.find('[').expect("timestamp opening bracket") + 1;
    let end = line[start..].find(']').expect("timestamp closing bracket") + start;
    let timestamp = &line[start..end];
    assert!(timestamp.ends_with('Z'), "timestamp: {}", timestamp);
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_request_passes_through_unchanged() {
    let (logs, _guard) = capture_logs();
    let store = InMemoryProductStore::new();
    let router = protected_router(store.clone(), TEST_KEY);

    let create = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header("content-type", "application/json")
        .header("x-api-key", TEST_KEY)
        .body(Body::from(lamp_payload().to_string()))
        .unwrap();
    let (status, body) = send(&router, create).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Desk Lamp");
    assert_eq!(body["price"], 19.99);
    assert_eq!(store.len().await, 1);
    assert_eq!(access_lines(&logs.lines()).len(), 1);
}
