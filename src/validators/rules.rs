use std::fmt;

use regex::Regex;
use serde_json::Value;

/// Runtime kind of a raw input value, named the way error messages print it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "NULL",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra predicate applied after the type, length and pattern checks.
#[derive(Clone, Copy)]
pub enum ValueFilter {
    Email,
    Predicate(fn(&Value) -> bool),
}

impl fmt::Debug for ValueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueFilter::Email => f.write_str("Email"),
            ValueFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Error family a raising validator reports its failure as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureKind {
    #[default]
    Validation,
    Conflict,
}

/// Immutable configuration of one field validator.
///
/// `min`/`max` only take effect when both are positive. A configured default
/// replaces an empty input and short-circuits every other check.
#[derive(Debug, Clone)]
pub struct ValidationSpec {
    pub(crate) kind: ValueKind,
    pub(crate) min: i64,
    pub(crate) max: i64,
    pub(crate) required: bool,
    pub(crate) null_only_absent: bool,
    pub(crate) default_value: Option<Value>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) filter: Option<ValueFilter>,
    pub(crate) error_message: Option<String>,
    pub(crate) invalid_type_message: Option<String>,
    pub(crate) required_message: Option<String>,
    pub(crate) invalid_length_message: Option<String>,
    pub(crate) throw_on_error: bool,
    pub(crate) error_code: Option<i32>,
    pub(crate) failure_kind: FailureKind,
}

impl ValidationSpec {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            min: 0,
            max: 0,
            required: false,
            null_only_absent: false,
            default_value: None,
            pattern: None,
            filter: None,
            error_message: None,
            invalid_type_message: None,
            required_message: None,
            invalid_length_message: None,
            throw_on_error: false,
            error_code: None,
            failure_kind: FailureKind::Validation,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueKind::String)
    }

    /// Required string that must look like an e-mail address.
    pub fn email() -> Self {
        Self::string().required(true).filter(ValueFilter::Email)
    }

    /// Optional string of 2 to 36 characters.
    pub fn name() -> Self {
        Self::string().length(2, 36)
    }

    /// Required string of 4 to 36 characters.
    pub fn password() -> Self {
        Self::string().required(true).length(4, 36)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Treat only null as a missing value; `""`, `"0"` and other falsy
    /// values go through the type, length and format checks.
    pub fn null_only_absent(mut self) -> Self {
        self.null_only_absent = true;
        self
    }

    pub fn length(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn filter(mut self, filter: ValueFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn invalid_type_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_type_message = Some(message.into());
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Prefix of the length error; the active bounds are appended to it.
    pub fn invalid_length_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_length_message = Some(message.into());
        self
    }

    /// Report failures as `Err(ValidatorError::Rejected)` instead of `Ok(false)`.
    pub fn throw_on_error(mut self, kind: FailureKind, code: Option<i32>) -> Self {
        self.throw_on_error = true;
        self.failure_kind = kind;
        self.error_code = code;
        self
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) fn has_length_bounds(&self) -> bool {
        self.min > 0 && self.max > 0
    }
}
