//! Declarative field validators.
//!
//! A [`FieldValidator`] checks one raw value against its [`ValidationSpec`] and
//! accumulates human readable messages. The presets (`string`, `email`, `name`,
//! `password`) only differ by configuration.

mod rules;

pub use rules::{FailureKind, ValidationSpec, ValueFilter, ValueKind};

use serde_json::Value;
use thiserror::Error;
use validator::ValidateEmail;

pub const REQUIRED_MESSAGE: &str = "This param is required";
pub const INVALID_LENGTH_PREFIX: &str = "This param length should be ";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid param value format";
pub const INVALID_VALUE_MESSAGE: &str = "Invalid param value";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidatorError {
    /// Raised instead of returning `Ok(false)` when `throw_on_error` is set.
    #[error("{message}")]
    Rejected {
        kind: FailureKind,
        message: String,
        code: Option<i32>,
    },
    /// The validator was configured for a value it can never check.
    #[error("validator misconfigured: {0}")]
    Configuration(String),
}

#[derive(Debug, Clone)]
pub struct FieldValidator {
    spec: ValidationSpec,
    errors: Vec<String>,
}

impl FieldValidator {
    pub fn new(spec: ValidationSpec) -> Self {
        Self {
            spec,
            errors: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(ValidationSpec::string())
    }

    pub fn email() -> Self {
        Self::new(ValidationSpec::email())
    }

    pub fn name() -> Self {
        Self::new(ValidationSpec::name())
    }

    pub fn password() -> Self {
        Self::new(ValidationSpec::password())
    }

    pub fn spec(&self) -> &ValidationSpec {
        &self.spec
    }

    pub fn is_required(&self) -> bool {
        self.spec.required
    }

    /// Messages collected so far. They are kept across `validate` calls on the
    /// same instance until `clear_errors` is called.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Check `value`, replacing it with the configured default when empty.
    ///
    /// Returns whether the accumulated error list is empty, or
    /// `ValidatorError::Rejected` when `throw_on_error` is set.
    pub fn validate(&mut self, value: &mut Value) -> Result<bool, ValidatorError> {
        let absent = if self.spec.null_only_absent {
            value.is_null()
        } else {
            is_empty(value)
        };
        if absent {
            if let Some(default) = &self.spec.default_value {
                *value = default.clone();
                return Ok(true);
            }
            if !self.spec.required {
                return Ok(true);
            }
            let message = self
                .spec
                .required_message
                .clone()
                .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
            self.errors.push(message);
            return self.finish();
        }

        let given = ValueKind::of(value);
        if given != self.spec.kind {
            let message = self.spec.invalid_type_message.clone().unwrap_or_else(|| {
                format!("This param must be an {}, {} given", self.spec.kind, given)
            });
            self.errors.push(message);
            // Length and pattern checks assume the configured kind.
            return self.finish();
        }

        self.check_length(value)?;
        self.check_pattern(value)?;
        self.check_filter(value);

        self.finish()
    }

    fn check_length(&mut self, value: &Value) -> Result<(), ValidatorError> {
        if !self.spec.has_length_bounds() {
            return Ok(());
        }

        let length = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(i64::MAX),
            Value::String(s) => s.chars().count() as i64,
            Value::Array(items) => items.len() as i64,
            Value::Object(entries) => entries.len() as i64,
            other => {
                return Err(ValidatorError::Configuration(format!(
                    "Impossible measure the length of {}",
                    ValueKind::of(other)
                )));
            }
        };

        let (min, max) = (self.spec.min, self.spec.max);
        if length < min || length > max {
            let mut message = self
                .spec
                .invalid_length_message
                .clone()
                .unwrap_or_else(|| INVALID_LENGTH_PREFIX.to_string());
            message.push_str(&length_bounds(min, max));
            self.errors.push(message);
        }
        Ok(())
    }

    fn check_pattern(&mut self, value: &Value) -> Result<(), ValidatorError> {
        let Some(pattern) = &self.spec.pattern else {
            return Ok(());
        };
        let Value::String(text) = value else {
            return Err(ValidatorError::Configuration(format!(
                "Impossible validate {} by regexp",
                ValueKind::of(value)
            )));
        };
        if !pattern.is_match(text) {
            let message = self
                .spec
                .error_message
                .clone()
                .unwrap_or_else(|| INVALID_FORMAT_MESSAGE.to_string());
            self.errors.push(message);
        }
        Ok(())
    }

    fn check_filter(&mut self, value: &Value) {
        let passed = match self.spec.filter {
            None => return,
            Some(ValueFilter::Email) => value.as_str().is_some_and(|s| s.validate_email()),
            Some(ValueFilter::Predicate(predicate)) => predicate(value),
        };
        if !passed {
            let message = self
                .spec
                .error_message
                .clone()
                .unwrap_or_else(|| INVALID_VALUE_MESSAGE.to_string());
            self.errors.push(message);
        }
    }

    fn finish(&self) -> Result<bool, ValidatorError> {
        if !self.spec.throw_on_error || self.errors.is_empty() {
            return Ok(self.errors.is_empty());
        }
        Err(ValidatorError::Rejected {
            kind: self.spec.failure_kind,
            message: self.errors.join("; "),
            code: self.spec.error_code,
        })
    }
}

/// Falsy values: null, `""`, `"0"`, zero, `false` and empty collections.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

fn length_bounds(min: i64, max: i64) -> String {
    match (min > 0, max > 0) {
        (true, true) => format!("between {min} and {max}"),
        (true, false) => format!("more than {min}"),
        _ => format!("less than {max}"),
    }
}
