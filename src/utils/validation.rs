use validator::Validate;

use crate::errors::{AppError, ViolationList};

/// Validate a payload implementing `validator::Validate` and turn failures into
/// an `AppError::Validation` so handlers can `?` it.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut violations = ViolationList::new();
    for (field, errs) in fields {
        for e in errs.iter() {
            let message = e
                .message
                .clone()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "This value is not valid.".to_string());
            violations.add(field.to_string(), message);
        }
    }
    violations.into_validation_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1))]
        name: String,
        #[validate(email(message = "This value is not a valid email address."))]
        email: String,
    }

    #[test]
    fn test_validate_payload_err() {
        let p = TestPayload {
            name: "".into(),
            email: "nope".into(),
        };
        let err = validate_payload(&p).unwrap_err();
        let violations = err.violations().expect("violations");
        assert!(violations.has_field("name"));
        assert!(violations.has_field("email"));
        assert!(violations.detail().contains("email: This value is not a valid email address."));
    }

    #[test]
    fn test_validate_payload_ok() {
        let p = TestPayload {
            name: "ok".into(),
            email: "ok@example.com".into(),
        };
        assert!(validate_payload(&p).is_ok());
    }
}
