use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::admin::Admin;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Claims {
    pub sub: i64, // admin id
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

pub const TOKEN_NOT_FOUND: &str = "JWT Token not found";
pub const INVALID_TOKEN: &str = "Invalid JWT Token";
pub const EXPIRED_TOKEN: &str = "Expired JWT Token";

//function to create a JWT token for a persisted admin
pub fn create_jwt(admin: &Admin, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let id = admin
        .id
        .ok_or_else(|| AppError::Configuration("cannot issue a token for an unsaved admin".into()))?;

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Configuration("failed to compute token expiration".into()))?;

    let claims = Claims {
        sub: id,
        username: admin.email.clone(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

//function to decode and validate a JWT token
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized(EXPIRED_TOKEN),
        _ => AppError::unauthorized(INVALID_TOKEN),
    })
}
