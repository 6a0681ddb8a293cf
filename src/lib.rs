//! # Product Catalog
//!
//! A small HTTP API for CRUD, search and category stats over an in-memory
//! product catalog.
//!
//! ## Features
//!
//! - **CRUD**: create, fetch, partially update and delete products
//! - **Listing**: category and price filters with page/limit pagination
//! - **Search**: case-insensitive substring match on product names
//! - **Validation**: typed request bodies with ordered, aggregated error messages
//! - **Authentication**: optional shared-secret `x-api-key` header
//! - **Uniform errors**: every failure answers `{ "error": { "message", "status" } }`
//!
//! ## Architecture
//!
//! - [`catalog`] - Product types, query semantics and the in-memory store
//! - [`server`] - Axum router, handlers, validation, auth and request logging
//! - [`error`] - Error taxonomy and the error responder
//! - [`config`] - CLI and environment configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use product_catalog::{create_router, InMemoryProductStore, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryProductStore::with_sample_data();
//!     let router = create_router(store, RouterConfig::new("my-api-key"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use catalog::{
    CategoryCounts, CategoryStats, InMemoryProductStore, ListQuery, NewProduct, Product,
    ProductPage, ProductPatch, ProductRepository, SearchResult,
};
pub use config::Config;
pub use error::{ApiError, AppError, ErrorDetail, ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use server::{
    api_key_middleware, create_router, ApiKeyAuth, AppState, RouterConfig, ValidationMode,
};
