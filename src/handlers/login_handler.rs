use std::sync::Arc;

use axum::{Extension, Json, http::StatusCode};
use sqlx::MySqlPool;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::repositories::admin_repository::{AdminRepository, AdminStore};
//import schemas for login request and response
use crate::schemas::login_schema::{LoginSchema, TokenResponseSchema};
use crate::services::password_hasher::PasswordHasher;
use crate::utils::handler::HandlerResult;
//import util JWT generation
use crate::utils::jwt::create_jwt;
use crate::utils::validation::validate_payload;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

// Handler for admin login
pub async fn login_handler(
    Extension(db_pool): Extension<MySqlPool>,
    Extension(config): Extension<Arc<AppConfig>>,
    Extension(hasher): Extension<Arc<dyn PasswordHasher>>,
    Json(payload): Json<LoginSchema>,
) -> HandlerResult<TokenResponseSchema> {
    validate_payload(&payload)?;

    let admin = AdminRepository::new(db_pool)
        .find_one_by_email(&payload.email)
        .await?;

    // Same answer for an unknown email and a wrong password
    let Some(admin) = admin else {
        tracing::info!(email = %payload.email, "login failed: unknown admin");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };
    let Some(hash) = admin.password.as_deref() else {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };
    if !hasher.verify(hash, &payload.password).await? {
        tracing::info!(email = %payload.email, "login failed: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_jwt(&admin, config.jwt_secret()?, config.jwt_ttl_hours)?;
    tracing::info!(email = %admin.email, "admin logged in");

    Ok((StatusCode::OK, Json(TokenResponseSchema { token })))
}
