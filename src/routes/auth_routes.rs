use axum::{Router, routing::post};

// Import the login handler
use crate::handlers::login_handler::login_handler;
use crate::routes::RouteName;

// Function to create auth routes
pub fn auth_routes() -> Router {
    Router::new().route(RouteName::Login.path(), post(login_handler))
}
