//! Error taxonomy and the terminal error responder.
//!
//! Every expected failure raised by the store, the validator or the auth gate
//! is an [`AppError`]. Anything else is an unexpected fault, carried as
//! [`ApiError::Unexpected`] and masked behind a generic 500 response.
//!
//! All failures leave the service in the same JSON envelope:
//!
//! ```json
//! { "error": { "message": "Product with id 42 not found", "status": 404 } }
//! ```

use std::any::Any;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Message sent to the caller for every unexpected fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

// =============================================================================
// Taxonomy
// =============================================================================

/// Expected, operational failures that are safe to expose to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Requested resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Request payload failed validation (400)
    #[error("{0}")]
    Validation(String),

    /// Missing or wrong API key (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Any other operational failure with an explicit status
    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl AppError {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    /// Create a generic operational error. Defaults to 500 when `status` is `None`.
    pub fn with_status(message: impl Into<String>, status: Option<StatusCode>) -> Self {
        AppError::Status {
            status: status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: message.into(),
        }
    }

    /// HTTP status carried by this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Status { status, .. } => *status,
        }
    }

    /// Caller-facing message.
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(message)
            | AppError::Validation(message)
            | AppError::Unauthorized(message)
            | AppError::Status { message, .. } => message,
        }
    }

    /// Every taxonomy error marks an anticipated condition.
    pub fn is_operational(&self) -> bool {
        true
    }

    /// Short tag used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Status { .. } => "app_error",
        }
    }
}

impl Default for AppError {
    fn default() -> Self {
        AppError::with_status(INTERNAL_ERROR_MESSAGE, None)
    }
}

// =============================================================================
// Handler Error
// =============================================================================

/// Error type returned by every handler, extractor and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A taxonomy error; its status and message reach the caller verbatim.
    #[error(transparent)]
    Operational(#[from] AppError),

    /// An unexpected fault; details stay in the server log.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Wrap any foreign error as an unexpected fault.
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        ApiError::Unexpected(err.to_string())
    }

    /// Whether this error is part of the taxonomy.
    pub fn is_operational(&self) -> bool {
        matches!(self, ApiError::Operational(_))
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// JSON envelope returned for all error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Body of the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub message: String,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create an envelope for the given message and status.
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                status: status.as_u16(),
            },
        }
    }

    /// The fixed envelope used for unexpected faults.
    pub fn internal() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

// =============================================================================
// Error Responder
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Only unexpected faults reach the operator log above debug.
        debug!(
            error_type = self.kind(),
            status = status.as_u16(),
            "Operational error: {}",
            self.message()
        );

        let body = ErrorResponse::new(self.message(), status);
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Operational(err) => err.into_response(),
            ApiError::Unexpected(detail) => {
                error!(detail = %detail, "Unexpected error");
                internal_error_response()
            }
        }
    }
}

/// Build the masked 500 response.
fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal()),
    )
        .into_response()
}

/// Turn a caught panic into the masked 500 response.
///
/// Installed through `CatchPanicLayer::custom`, so a panicking handler is
/// reported the same way as any other unexpected fault.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(detail = %detail, "Unexpected error: handler panicked");

    let mut response = internal_error_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

// =============================================================================
// Tests
// =============================================================================
