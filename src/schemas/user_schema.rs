use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, ViolationList};
use crate::mapper::{FieldMapping, FieldTable, MappingError, Projection};
use crate::models::user::User;
use crate::validators::{FieldValidator, ValidationSpec};

pub const NOT_BLANK_MESSAGE: &str = "This value should not be blank.";
pub const INVALID_EMAIL_MESSAGE: &str = "This value is not a valid email address.";
pub const INVALID_LENGTH_MESSAGE: &str = "This value length should be ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGroup {
    Default,
    Create,
    Update,
    PasswordChange,
}

impl ValidationGroup {
    /// Groups checked for one write: always `Default`, then `Create` or
    /// `Update`, plus `PasswordChange` when a new password comes in.
    pub fn resolve(is_new: bool, password_changed: bool) -> Vec<ValidationGroup> {
        let mut groups = vec![ValidationGroup::Default];
        groups.push(if is_new {
            ValidationGroup::Create
        } else {
            ValidationGroup::Update
        });
        if password_changed {
            groups.push(ValidationGroup::PasswordChange);
        }
        groups
    }
}

/// Body of `POST /api/users` and `PUT /api/users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputPayload {
    pub uuid: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Write-side projection of a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInput {
    pub uuid: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

struct Rule {
    field: &'static str,
    group: ValidationGroup,
    constraint: fn() -> ValidationSpec,
}

fn not_blank() -> ValidationSpec {
    ValidationSpec::string()
        .required(true)
        .required_message(NOT_BLANK_MESSAGE)
}

fn uuid_length() -> ValidationSpec {
    ValidationSpec::string()
        .null_only_absent()
        .length(36, 36)
        .invalid_length_message(INVALID_LENGTH_MESSAGE)
}

fn email_format() -> ValidationSpec {
    ValidationSpec::email()
        .required(false)
        .null_only_absent()
        .error_message(INVALID_EMAIL_MESSAGE)
}

fn password_length() -> ValidationSpec {
    ValidationSpec::password()
        .required(false)
        .null_only_absent()
        .invalid_length_message(INVALID_LENGTH_MESSAGE)
}

fn name_length() -> ValidationSpec {
    ValidationSpec::name()
        .null_only_absent()
        .invalid_length_message(INVALID_LENGTH_MESSAGE)
}

const RULES: &[Rule] = &[
    Rule { field: "uuid", group: ValidationGroup::Update, constraint: not_blank },
    Rule { field: "uuid", group: ValidationGroup::Default, constraint: uuid_length },
    Rule { field: "email", group: ValidationGroup::Create, constraint: not_blank },
    Rule { field: "email", group: ValidationGroup::Default, constraint: email_format },
    Rule { field: "password", group: ValidationGroup::PasswordChange, constraint: not_blank },
    Rule { field: "password", group: ValidationGroup::PasswordChange, constraint: password_length },
    Rule { field: "firstName", group: ValidationGroup::Create, constraint: not_blank },
    Rule { field: "firstName", group: ValidationGroup::Default, constraint: name_length },
    Rule { field: "lastName", group: ValidationGroup::Create, constraint: not_blank },
    Rule { field: "lastName", group: ValidationGroup::Default, constraint: name_length },
];

impl UserInput {
    /// Overlay the supplied payload fields; omitted ones keep their value.
    pub fn merge(&mut self, payload: UserInputPayload) {
        let UserInputPayload {
            uuid,
            email,
            password,
            first_name,
            last_name,
        } = payload;
        if uuid.is_some() {
            self.uuid = uuid;
        }
        if email.is_some() {
            self.email = email;
        }
        if password.is_some() {
            self.password = password;
        }
        if first_name.is_some() {
            self.first_name = first_name;
        }
        if last_name.is_some() {
            self.last_name = last_name;
        }
    }

    fn field(&self, name: &str) -> Option<&String> {
        match name {
            "uuid" => self.uuid.as_ref(),
            "email" => self.email.as_ref(),
            "password" => self.password.as_ref(),
            "firstName" => self.first_name.as_ref(),
            "lastName" => self.last_name.as_ref(),
            _ => None,
        }
    }

    /// Run every rule of `groups` and report all violations at once.
    pub fn validate(&self, groups: &[ValidationGroup]) -> Result<(), AppError> {
        let mut violations = ViolationList::new();
        for rule in RULES.iter().filter(|r| groups.contains(&r.group)) {
            let mut value = self
                .field(rule.field)
                .map(|s| Value::String(s.clone()))
                .unwrap_or(Value::Null);
            let mut validator = FieldValidator::new((rule.constraint)());
            if !validator.validate(&mut value)? {
                for error in validator.errors() {
                    violations.add(rule.field, error.clone());
                }
            }
        }
        violations.into_validation_result()
    }

    /// True when the input carries a password other than the stored hash.
    pub fn password_changed(&self, user: &User) -> bool {
        user.is_new() || self.password.as_deref() != Some(user.password.as_str())
    }

    pub fn create_or_update_entity(&self, user: Option<User>) -> Result<User, MappingError> {
        let mut user = user.unwrap_or_default();
        let is_new = user.is_new();
        self.set_entity_attributes(&mut user, is_new)?;
        Ok(user)
    }
}

impl Projection<User> for UserInput {
    fn describe() -> FieldTable<Self, User> {
        type Field = FieldMapping<UserInput, User>;
        FieldTable::new(vec![
            Field::new("uuid", |d| d.uuid.is_none())
                .load(|u, d| d.uuid = Some(u.uuid.clone()))
                .store(|d, u| {
                    u.uuid = required(&d.uuid, "uuid")?;
                    Ok(())
                }),
            Field::new("email", |d| d.email.is_none())
                .load(|u, d| d.email = Some(u.email.clone()))
                .store(|d, u| {
                    u.email = required(&d.email, "email")?;
                    Ok(())
                }),
            Field::new("password", |d| d.password.is_none())
                .load(|u, d| d.password = Some(u.password.clone()))
                .store(|d, u| {
                    u.password = required(&d.password, "password")?;
                    Ok(())
                }),
            Field::new("firstName", |d| d.first_name.is_none())
                .load(|u, d| d.first_name = Some(u.first_name.clone()))
                .store(|d, u| {
                    u.first_name = required(&d.first_name, "firstName")?;
                    Ok(())
                }),
            Field::new("lastName", |d| d.last_name.is_none())
                .load(|u, d| d.last_name = Some(u.last_name.clone()))
                .store(|d, u| {
                    u.last_name = required(&d.last_name, "lastName")?;
                    Ok(())
                }),
        ])
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, MappingError> {
    value.clone().ok_or(MappingError::NullNotAllowed { field })
}

/// Read-side projection; the password never leaves the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOutput {
    pub id: i64,
    pub uuid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Projection<User> for UserOutput {
    fn describe() -> FieldTable<Self, User> {
        type Field = FieldMapping<UserOutput, User>;
        FieldTable::new(vec![
            Field::new("id", |_| false).load(|u, d| d.id = u.id.unwrap_or_default()),
            Field::new("uuid", |_| false).load(|u, d| d.uuid = u.uuid.clone()),
            Field::new("email", |_| false).load(|u, d| d.email = u.email.clone()),
            Field::new("firstName", |_| false).load(|u, d| d.first_name = u.first_name.clone()),
            Field::new("lastName", |_| false).load(|u, d| d.last_name = u.last_name.clone()),
        ])
    }
}
