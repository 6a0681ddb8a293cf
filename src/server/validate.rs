//! Request body validation for product writes.
//!
//! Validation turns an untyped JSON object into a typed payload or a single
//! [`AppError::Validation`] listing every violated field. Checks run in a
//! fixed order (`name`, `description`, `price`, `category`, `inStock`) and the
//! messages are joined with `"; "`.
//!
//! The [`CreateProduct`] and [`UpdateProduct`] extractors run validation
//! before the handler sees the request, so a handler only ever receives
//! well-typed input.

use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use serde_json::{Map, Value};

use crate::catalog::{NewProduct, ProductPatch};
use crate::error::{ApiError, AppError};

/// Message for a body that is not parseable JSON.
pub const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// Message for a JSON body that is not an object.
pub const NOT_AN_OBJECT_MESSAGE: &str = "Request body must be a JSON object";

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const PRICE: &str = "price";
const CATEGORY: &str = "category";
const IN_STOCK: &str = "inStock";

/// Which operation a payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every field required; strings must be non-empty
    Create,
    /// Every field optional; supplied fields must have the right type
    Update,
}

// =============================================================================
// Boolean-like Values
// =============================================================================

/// Whether `value` is accepted as a boolean: `true`/`false`, the strings
/// `"true"`/`"false"`, or the numbers `0`/`1`.
pub fn is_boolean_like(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => s == "true" || s == "false",
        Value::Number(n) => matches!(n.as_f64(), Some(f) if f == 0.0 || f == 1.0),
        _ => false,
    }
}

/// Strict boolean for a boolean-like value. Only `true`, `"true"` and `1`
/// map to `true`.
pub fn coerce_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

// =============================================================================
// Field Checks
// =============================================================================

/// Collects field values and violation messages in check order.
struct Checker<'a> {
    payload: &'a Map<String, Value>,
    mode: ValidationMode,
    errors: Vec<String>,
}

impl<'a> Checker<'a> {
    fn new(payload: &'a Map<String, Value>, mode: ValidationMode) -> Self {
        Self {
            payload,
            mode,
            errors: Vec::new(),
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let value = self.payload.get(field);
        match (self.mode, value) {
            (ValidationMode::Create, Some(Value::String(s))) if !s.is_empty() => Some(s.clone()),
            (ValidationMode::Create, _) => {
                self.errors
                    .push(format!("{} is required and must be a string", field));
                None
            }
            (ValidationMode::Update, None) => None,
            (ValidationMode::Update, Some(Value::String(s))) => Some(s.clone()),
            (ValidationMode::Update, Some(_)) => {
                self.errors.push(format!("{} must be a string", field));
                None
            }
        }
    }

    fn number(&mut self, field: &str) -> Option<f64> {
        let value = self.payload.get(field);
        let parsed = value.and_then(Value::as_f64);
        match (self.mode, value, parsed) {
            (_, Some(_), Some(n)) => Some(n),
            (ValidationMode::Update, None, _) => None,
            (ValidationMode::Create, _, _) => {
                self.errors
                    .push(format!("{} is required and must be a number", field));
                None
            }
            (ValidationMode::Update, Some(_), None) => {
                self.errors.push(format!("{} must be a number", field));
                None
            }
        }
    }

    fn boolean(&mut self, field: &str) -> Option<bool> {
        match self.payload.get(field) {
            Some(value) if is_boolean_like(value) => Some(coerce_boolean(value)),
            Some(_) => {
                self.errors.push(format!("{} must be boolean", field));
                None
            }
            None if self.mode == ValidationMode::Create => {
                self.errors
                    .push(format!("{} is required and must be boolean", field));
                None
            }
            None => None,
        }
    }

    fn finish(self, patch: ProductPatch) -> Result<ProductPatch, AppError> {
        if self.errors.is_empty() {
            Ok(patch)
        } else {
            Err(AppError::validation(self.errors.join("; ")))
        }
    }
}

/// Validate `payload` for `mode`.
///
/// On success the returned patch holds every supplied field, with `inStock`
/// normalized to a strict boolean. Unknown fields are ignored.
pub fn validate_product(
    payload: &Map<String, Value>,
    mode: ValidationMode,
) -> Result<ProductPatch, AppError> {
    let mut checker = Checker::new(payload, mode);

    let patch = ProductPatch {
        name: checker.string(NAME),
        description: checker.string(DESCRIPTION),
        price: checker.number(PRICE),
        category: checker.string(CATEGORY),
        in_stock: checker.boolean(IN_STOCK),
    };

    checker.finish(patch)
}

/// Validate a create payload.
pub fn validate_create(payload: &Map<String, Value>) -> Result<NewProduct, AppError> {
    match validate_product(payload, ValidationMode::Create)? {
        ProductPatch {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            category: Some(category),
            in_stock: Some(in_stock),
        } => Ok(NewProduct {
            name,
            description,
            price,
            category,
            in_stock,
        }),
        _ => Err(AppError::validation("Validation Error")),
    }
}

/// Validate an update payload.
pub fn validate_update(payload: &Map<String, Value>) -> Result<ProductPatch, AppError> {
    validate_product(payload, ValidationMode::Update)
}

// =============================================================================
// Body Parsing
// =============================================================================

/// Parse a raw request body into a JSON object. An empty body is an empty object.
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::validation(NOT_AN_OBJECT_MESSAGE)),
        Err(_) => Err(AppError::validation(INVALID_JSON_MESSAGE)),
    }
}

async fn read_payload<S>(req: Request, state: &S) -> Result<Map<String, Value>, ApiError>
where
    S: Send + Sync,
{
    let body = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| {
            AppError::with_status(rejection.body_text(), Some(rejection.status()))
        })?;

    Ok(parse_body(&body)?)
}

// =============================================================================
// Extractors
// =============================================================================

/// Extractor yielding a validated create payload.
#[derive(Debug, Clone)]
pub struct CreateProduct(pub NewProduct);

impl<S> FromRequest<S> for CreateProduct
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = read_payload(req, state).await?;
        Ok(CreateProduct(validate_create(&payload)?))
    }
}

/// Extractor yielding a validated update payload.
#[derive(Debug, Clone)]
pub struct UpdateProduct(pub ProductPatch);

impl<S> FromRequest<S> for UpdateProduct
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = read_payload(req, state).await?;
        Ok(UpdateProduct(validate_update(&payload)?))
    }
}

// =============================================================================
// Tests
// =============================================================================
