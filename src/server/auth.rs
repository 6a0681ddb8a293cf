//! Shared-secret API key authentication.
//!
//! Requests carry the secret in the `x-api-key` header (header names are
//! case-insensitive). When the server has no secret configured the gate is
//! open and every request passes; this is intended for local development.
//!
//! # Example
//!
//! ```rust
//! use product_catalog::server::auth::ApiKeyAuth;
//!
//! let auth = ApiKeyAuth::new("s3cret");
//! assert!(auth.verify(Some(b"s3cret")).is_ok());
//! assert!(auth.verify(Some(b"s3cret!")).is_err());
//! assert!(auth.verify(None).is_err());
//!
//! let open = ApiKeyAuth::new("");
//! assert!(open.verify(None).is_ok());
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::error::{ApiError, AppError};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Message returned for a missing or wrong key.
pub const INVALID_API_KEY_MESSAGE: &str = "Invalid or missing API key";

// =============================================================================
// API Key Gate
// =============================================================================

/// Compares request keys against the configured secret.
#[derive(Clone)]
pub struct ApiKeyAuth {
    /// `None` means no secret is configured and the gate is open
    secret: Option<Arc<str>>,
}

impl ApiKeyAuth {
    /// Create a gate for `secret`. An empty secret leaves the gate open.
    pub fn new(secret: impl AsRef<str>) -> Self {
        let secret = secret.as_ref();
        Self {
            secret: (!secret.is_empty()).then(|| Arc::from(secret)),
        }
    }

    /// Check a provided key.
    ///
    /// The comparison is exact and runs in constant time for keys of equal
    /// length.
    pub fn verify(&self, provided: Option<&[u8]>) -> Result<(), AppError> {
        let Some(secret) = self.secret.as_deref() else {
            return Ok(());
        };

        match provided {
            Some(key) if bool::from(key.ct_eq(secret.as_bytes())) => Ok(()),
            _ => Err(AppError::unauthorized(INVALID_API_KEY_MESSAGE)),
        }
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware enforcing the API key.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use product_catalog::server::auth::{api_key_middleware, ApiKeyAuth};
///
/// let app = Router::new()
///     .route("/api/products", get(list_products_handler))
///     .route_layer(middleware::from_fn_with_state(
///         ApiKeyAuth::new("s3cret"),
///         api_key_middleware,
///     ));
/// ```
pub async fn api_key_middleware(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes());

    auth.verify(provided)?;

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
