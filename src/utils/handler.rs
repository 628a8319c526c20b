use crate::errors::AppError;
use axum::{Json, http::StatusCode};

/// Generic handler result type used across HTTP handlers to simplify signatures.
///
/// Failures render through `AppError`'s `IntoResponse`.
pub type HandlerResult<T = serde_json::Value> = Result<(StatusCode, Json<T>), AppError>;
