//! Per-request access log.
//!
//! One `info` event is written for every request before it is dispatched,
//! carrying an ISO-8601 UTC timestamp, the method and the path (with query
//! string). The request itself is never altered.

use axum::{extract::Request, middleware::Next, response::Response};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

/// Format the access-log line for a request.
pub fn request_line(timestamp: DateTime<Utc>, method: &str, path: &str) -> String {
    format!(
        "[{}] {} {}",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        path
    )
}

/// Axum middleware logging each request.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use product_catalog::server::logging::log_request;
///
/// let app = Router::new().layer(middleware::from_fn(log_request));
/// ```
pub async fn log_request(request: Request, next: Next) -> Response {
    let timestamp = Utc::now();
    let method = request.method().as_str().to_string();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    info!(
        timestamp = %timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        method = %method,
        path = %path,
        "{}",
        request_line(timestamp, &method, &path)
    );

    next.run(request).await
}
