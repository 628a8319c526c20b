use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

// Import user-related handlers
use crate::handlers::user_handler::{destroy, index, show, store, update};

// Import middleware for authentication
use crate::config::AppConfig;
use crate::middlewares::auth_middleware::auth_middleware;
use crate::routes::RouteName;

pub fn user_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route(RouteName::UsersCollection.path(), get(index))
        .route(RouteName::CreateUser.path(), post(store))
        .route(RouteName::UserItem.path(), get(show))
        .route(RouteName::UpdateUser.path(), put(update))
        .route(RouteName::DeleteUser.path(), delete(destroy))
        // Apply authentication middleware to user routes
        .layer(middleware::from_fn_with_state(config, auth_middleware))
}
