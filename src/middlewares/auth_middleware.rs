use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::utils::jwt::{TOKEN_NOT_FOUND, decode_jwt};

// Authentication middleware to protect routes
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract the bearer token from the Authorization header
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized(TOKEN_NOT_FOUND))?
        .to_owned();

    let claims = decode_jwt(&token, config.jwt_secret()?).inspect_err(|e| {
        tracing::debug!("rejected token: {}", e);
    })?;

    // Handlers can read the admin identity from the request extensions
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
