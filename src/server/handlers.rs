//! HTTP request handlers for the product API.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/products` - List with filters and pagination
//! - `GET /api/products/search?q=` - Name search
//! - `GET /api/products/stats` - Counts per category
//! - `GET /api/products/{id}` - Fetch one product
//! - `POST /api/products` - Create
//! - `PUT /api/products/{id}` - Partial update
//! - `DELETE /api/products/{id}` - Delete

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    CategoryStats, ListQuery, Product, ProductPage, ProductRepository, SearchResult,
};
use crate::error::{ApiError, AppError};

use super::validate::{CreateProduct, UpdateProduct};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the product store.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<R: ProductRepository> {
    /// The product store
    pub store: Arc<R>,
}

impl<R: ProductRepository> AppState<R> {
    /// Create a new application state around a store.
    pub fn new(store: R) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<R: ProductRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the list endpoint.
///
/// Values are kept as raw strings; bad numbers fall back to defaults instead
/// of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    /// Case-insensitive category filter
    #[serde(default)]
    pub category: Option<String>,

    /// Page number (default: 1)
    #[serde(default)]
    pub page: Option<String>,

    /// Page size (default: 10)
    #[serde(default)]
    pub limit: Option<String>,

    /// Inclusive minimum price
    #[serde(default, rename = "minPrice")]
    pub min_price: Option<String>,

    /// Inclusive maximum price
    #[serde(default, rename = "maxPrice")]
    pub max_price: Option<String>,
}

impl ListQueryParams {
    /// Parse into a typed list query.
    pub fn to_query(&self) -> ListQuery {
        ListQuery::parse(
            self.category.as_deref(),
            self.page.as_deref(),
            self.limit.as_deref(),
            self.min_price.as_deref(),
            self.max_price.as_deref(),
        )
    }
}

/// Query parameters for the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQueryParams {
    /// Search term
    #[serde(default)]
    pub q: Option<String>,
}

/// Map a malformed query string to a validation error.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::validation(rejection.body_text()).into())
}

/// Map a path that could not be extracted (e.g. invalid UTF-8 after
/// percent-decoding) to an operational error with the rejection's status.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::with_status(rejection.body_text(), Some(rejection.status())).into()
    })
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Response from the delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always `true`
    pub deleted: bool,

    /// The removed product
    pub product: Product,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle product list requests.
///
/// # Endpoint
///
/// `GET /api/products`
///
/// # Query Parameters
///
/// - `category`: Case-insensitive exact match
/// - `minPrice`, `maxPrice`: Inclusive bounds, ignored when not numeric
/// - `page`: 1-based page (default: 1)
/// - `limit`: Page size (default: 10)
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// { "total": 12, "page": 2, "limit": 5, "data": [ ... ] }
/// ```
///
/// `total` counts every filtered match, not just the returned page.
pub async fn list_products_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListQueryParams>, QueryRejection>,
) -> Result<Json<ProductPage>, ApiError> {
    let params = query_params(query)?;
    Ok(Json(state.store.list(&params.to_query()).await))
}

/// Handle product search requests.
///
/// # Endpoint
///
/// `GET /api/products/search?q={term}`
///
/// # Response
///
/// `200 OK` with JSON body `{ "total": n, "data": [ ... ] }`. A blank or
/// missing `q` returns `{ "total": 0, "data": [] }`.
pub async fn search_products_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
    query: Result<Query<SearchQueryParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let params = query_params(query)?;
    let term = params.q.unwrap_or_default();
    Ok(Json(state.store.search(&term).await))
}

/// Handle category stats requests.
///
/// # Endpoint
///
/// `GET /api/products/stats`
///
/// # Response
///
/// ```json
/// { "stats": { "electronics": 1, "stationery": 1 }, "totalProducts": 2 }
/// ```
pub async fn product_stats_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
) -> Json<CategoryStats> {
    Json(state.store.stats().await)
}

/// Handle single product requests.
///
/// # Endpoint
///
/// `GET /api/products/{id}`
///
/// # Errors
///
/// - `404 Not Found`: No product with that id
pub async fn get_product_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.store.get(&id).await?))
}

/// Handle product creation.
///
/// # Endpoint
///
/// `POST /api/products`
///
/// # Response
///
/// `201 Created` with the stored product, including its new `id`.
///
/// # Errors
///
/// - `400 Bad Request`: Body failed validation
pub async fn create_product_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
    CreateProduct(new): CreateProduct,
) -> (StatusCode, Json<Product>) {
    let product = state.store.create(new).await;
    (StatusCode::CREATED, Json(product))
}

/// Handle partial product updates.
///
/// # Endpoint
///
/// `PUT /api/products/{id}`
///
/// Only fields present in the body change.
///
/// # Errors
///
/// - `400 Bad Request`: Body failed validation
/// - `404 Not Found`: No product with that id
pub async fn update_product_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
    UpdateProduct(patch): UpdateProduct,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.store.update(&id, patch).await?))
}

/// Handle product deletion.
///
/// # Endpoint
///
/// `DELETE /api/products/{id}`
///
/// # Response
///
/// `200 OK` with `{ "deleted": true, "product": { ... } }`.
///
/// # Errors
///
/// - `404 Not Found`: No product with that id
pub async fn delete_product_handler<R: ProductRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = path_id(path)?;
    let product = state.store.delete(&id).await?;
    Ok(Json(DeleteResponse {
        deleted: true,
        product,
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found_handler() -> ApiError {
    AppError::not_found("Route not found").into()
}

// =============================================================================
// Tests
// =============================================================================
