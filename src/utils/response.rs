use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc2616#section-10";
pub const PROBLEM_TITLE: &str = "An error occurred";

/// Uniform error body: `{type, title, detail}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            kind: PROBLEM_TYPE.to_string(),
            title: PROBLEM_TITLE.to_string(),
            detail: detail.into(),
        }
    }
}

/// Body of authentication failures: `{code, message}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthErrorBody {
    pub code: u16,
    pub message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Configuration(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Database(_)
            | AppError::Mapping(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Unauthorized(message) => {
                let body = AuthErrorBody {
                    code: status.as_u16(),
                    message,
                };
                (status, Json(body)).into_response()
            }
            AppError::Validation(list) | AppError::Conflict(list) => {
                (status, Json(ProblemDetails::new(list.detail()))).into_response()
            }
            AppError::NotFound => (status, Json(ProblemDetails::new("Not Found"))).into_response(),
            other => {
                tracing::error!("request failed: {}", other);
                (status, Json(ProblemDetails::new("Internal Server Error"))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ViolationList;

    #[test]
    fn problem_serializes_type_key() {
        let value = serde_json::to_value(ProblemDetails::new("email: taken")).unwrap();
        assert_eq!(value["type"], PROBLEM_TYPE);
        assert_eq!(value["title"], PROBLEM_TITLE);
        assert_eq!(value["detail"], "email: taken");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let validation = AppError::Validation(ViolationList::single("uuid", "bad"));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::unauthorized("JWT Token not found").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Configuration("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
