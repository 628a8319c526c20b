use std::sync::Arc;

use axum::{Extension, Router};
use axum::http::{HeaderValue, Method};
use sqlx::MySqlPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{AppConfig, CorsConfig};
use crate::mapper::MappingError;
use crate::schemas::register_projections;
use crate::services::password_hasher::PasswordHasher;

const CORS_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// `None` when CORS is neither enabled nor given an origin list.
pub fn cors_layer(cors: &CorsConfig) -> Option<CorsLayer> {
    if !cors.enabled && cors.allowed_origins.is_none() {
        return None;
    }

    // "*" (or no list at all) is permissive; otherwise a CSV of origins
    let origin = match cors.allowed_origins.as_deref().map(str::trim) {
        None | Some("*") => AllowOrigin::from(Any),
        Some(list) => AllowOrigin::list(
            list.split(',')
                .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                .collect::<Vec<HeaderValue>>(),
        ),
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(CORS_METHODS)
            .allow_headers(Any),
    )
}

pub fn build_router(config: Arc<AppConfig>) -> Router {
    let mut app = crate::routes::api_routes(config.clone());

    if let Some(cors) = cors_layer(&config.cors) {
        app = app.layer(cors);
    }

    app
}

/// Full application: routes, CORS and the shared resources handlers extract.
pub fn create_app(
    pool: MySqlPool,
    config: Arc<AppConfig>,
    hasher: Arc<dyn PasswordHasher>,
) -> Result<Router, MappingError> {
    register_projections()?;

    Ok(build_router(config.clone())
        .layer(Extension(pool))
        .layer(Extension(config))
        .layer(Extension(hasher)))
}
