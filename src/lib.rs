pub mod config;
pub mod routes;
pub mod handlers;
pub mod schemas;
pub mod utils;
pub mod middlewares;
pub mod models;

pub mod commands;
pub mod errors;
pub mod mapper;
pub mod repositories;
pub mod services;
pub mod validators;

pub mod app;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use app::create_app;
