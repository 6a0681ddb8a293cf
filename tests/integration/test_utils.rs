//! Test utilities for integration tests.
//!
//! Helpers for building requests, reading JSON bodies and creating routers
//! over isolated stores.

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use product_catalog::catalog::{
    InMemoryProductStore, ListQuery, NewProduct, Product, ProductRepository,
};
use product_catalog::{create_router, RouterConfig};

/// Router over `store` with auth disabled and tracing off.
pub fn open_router(store: InMemoryProductStore) -> Router {
    create_router(store, RouterConfig::without_auth().with_tracing(false))
}

/// Router over `store` protected by `api_key`.
pub fn protected_router(store: InMemoryProductStore, api_key: &str) -> Router {
    create_router(store, RouterConfig::new(api_key).with_tracing(false))
}

/// Build a request with an optional JSON body.
pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Build a request with a raw string body.
pub fn raw_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request through the router and return status and JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Send a request through the router and return status and raw body text.
pub async fn send_text(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Every product in the store, in order.
pub async fn all_products(store: &InMemoryProductStore) -> Vec<Product> {
    let query = ListQuery {
        limit: usize::MAX,
        ..Default::default()
    };
    store.list(&query).await.data
}

/// A complete, valid create payload.
pub fn lamp_payload() -> Value {
    json!({
        "name": "Desk Lamp",
        "description": "LED desk lamp",
        "price": 19.99,
        "category": "home",
        "inStock": true
    })
}

/// Build a typed product input.
pub fn new_product(name: &str, price: f64, category: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        category: category.to_string(),
        in_stock: true,
    }
}

/// Store holding `count` products named `Item 0..count` in category `bulk`.
pub fn bulk_store(count: usize) -> InMemoryProductStore {
    let products = (0..count)
        .map(|i| Product::from_new(new_product(&format!("Item {}", i), i as f64, "bulk")))
        .collect();
    InMemoryProductStore::with_products(products)
}

/// Names of the products in a `data` array.
pub fn names(data: &Value) -> Vec<String> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

/// Assert the error envelope shape and contents.
pub fn assert_error(body: &Value, status: StatusCode, message: &str) {
    assert_eq!(
        body,
        &json!({ "error": { "message": message, "status": status.as_u16() } })
    );
}

// =============================================================================
// Log Capture
// =============================================================================

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

pub struct CapturedLogsWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogsWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedLogsWriter(Arc::clone(&self.0))
    }
}

impl io::Write for CapturedLogsWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    /// Captured output, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Route `INFO` and above on the current thread into a [`CapturedLogs`]
/// until the guard drops.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
