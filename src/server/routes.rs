//! Router configuration for the product API.
//!
//! This module defines the HTTP routes and applies middleware for request
//! logging, authentication, CORS and error handling.
//!
//! # Route Structure
//!
//! ```text
//! /health                          - Health check (public)
//! /api/products                    - List (GET), create (POST)
//! /api/products/search             - Name search (GET)
//! /api/products/stats              - Category counts (GET)
//! /api/products/{id}               - Get (GET), update (PUT), delete (DELETE)
//! ```
//!
//! Every `/api/products` route requires the API key when one is configured.
//! Unknown paths and unsupported methods on known paths both answer 404
//! `Route not found`.
//!
//! # Layer Order
//!
//! ```text
//! panic catcher -> trace (optional) -> CORS -> request log -> API key -> handler
//! ```
//!
//! # Example
//!
//! ```ignore
//! use product_catalog::catalog::InMemoryProductStore;
//! use product_catalog::server::routes::{create_router, RouterConfig};
//!
//! let store = InMemoryProductStore::with_sample_data();
//! let config = RouterConfig::new("my-api-key")
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(store, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderName, CONTENT_TYPE};
use http::Method;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::{api_key_middleware, ApiKeyAuth, API_KEY_HEADER};
use super::handlers::{
    create_product_handler, delete_product_handler, get_product_handler, health_handler,
    list_products_handler, not_found_handler, product_stats_handler, search_products_handler,
    update_product_handler, AppState,
};
use super::logging::log_request;
use crate::catalog::ProductRepository;
use crate::error::handle_panic;

/// Mount point of the product routes.
pub const PRODUCTS_PATH: &str = "/api/products";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Shared secret for the API key gate (empty = open)
    pub api_key: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable tower-http request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given API key.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Create a configuration with authentication disabled.
    ///
    /// **Warning**: This should only be used for development/testing.
    pub fn without_auth() -> Self {
        Self::new(String::new())
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `store` - The product store the handlers operate on
/// * `config` - Router configuration
pub fn create_router<R>(store: R, config: RouterConfig) -> Router
where
    R: ProductRepository + 'static,
{
    let app_state = AppState::new(store);
    let auth = ApiKeyAuth::new(&config.api_key);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest(PRODUCTS_PATH, build_product_routes(app_state, auth))
        .method_not_allowed_fallback(not_found_handler)
        .fallback(not_found_handler)
        .layer(middleware::from_fn(log_request))
        .layer(cors);

    let router = if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.layer(CatchPanicLayer::custom(handle_panic))
}

/// Build the product routes behind the API key gate.
fn build_product_routes<R>(app_state: AppState<R>, auth: ApiKeyAuth) -> Router
where
    R: ProductRepository + 'static,
{
    Router::new()
        .route(
            "/",
            get(list_products_handler::<R>).post(create_product_handler::<R>),
        )
        .route("/search", get(search_products_handler::<R>))
        .route("/stats", get(product_stats_handler::<R>))
        .route(
            "/{id}",
            get(get_product_handler::<R>)
                .put(update_product_handler::<R>)
                .delete(delete_product_handler::<R>),
        )
        .route_layer(middleware::from_fn_with_state(auth, api_key_middleware))
        .method_not_allowed_fallback(not_found_handler)
        .with_state(app_state)
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
