use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::mapper::MappingError;
use crate::validators::{FailureKind, ValidatorError};

/// One user-facing problem with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Field problems in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut list = Self::new();
        list.add(field, message);
        list
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// `field: message` lines, the `detail` of an error response.
    pub fn detail(&self) -> String {
        self.0
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_validation_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(ViolationList),
    #[error("{0}")]
    Conflict(ViolationList),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    Unauthorized(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    /// Field-level problems carried by validation and conflict errors.
    pub fn violations(&self) -> Option<&ViolationList> {
        match self {
            AppError::Validation(list) | AppError::Conflict(list) => Some(list),
            _ => None,
        }
    }
}

impl From<ValidatorError> for AppError {
    fn from(err: ValidatorError) -> Self {
        match err {
            ValidatorError::Rejected { kind, message, .. } => {
                let list = ViolationList::single("value", message);
                match kind {
                    FailureKind::Validation => AppError::Validation(list),
                    FailureKind::Conflict => AppError::Conflict(list),
                }
            }
            ValidatorError::Configuration(message) => AppError::Configuration(message),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}
