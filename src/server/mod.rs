//! HTTP server layer for the product API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │               /api/products, /api/products/{id}                 │
//! │                                                                 │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │
//! │  │ logging  │ │   auth   │ │ validate │ │handlers │ │ routes │  │
//! │  │(req log) │ │(api key) │ │ (bodies) │ │(CRUD)   │ │(router)│  │
//! │  └──────────┘ └──────────┘ └──────────┘ └─────────┘ └────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod validate;

pub use auth::{api_key_middleware, ApiKeyAuth, API_KEY_HEADER, INVALID_API_KEY_MESSAGE};
pub use handlers::{
    create_product_handler, delete_product_handler, get_product_handler, health_handler,
    list_products_handler, not_found_handler, product_stats_handler, search_products_handler,
    update_product_handler, AppState, DeleteResponse, HealthResponse, ListQueryParams,
    SearchQueryParams,
};
pub use logging::{log_request, request_line};
pub use routes::{create_router, RouterConfig, PRODUCTS_PATH};
pub use validate::{
    coerce_boolean, is_boolean_like, parse_body, validate_create, validate_product,
    validate_update, CreateProduct, UpdateProduct, ValidationMode,
};
