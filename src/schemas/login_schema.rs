use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginSchema {
    #[validate(email(message = "This value is not a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "This value should not be blank."))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponseSchema {
    pub token: String,
}
