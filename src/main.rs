use std::sync::Arc;

use dotenvy::dotenv;

use admin_users_api::config::{self, AppConfig};
use admin_users_api::create_app;
use admin_users_api::services::password_hasher::BcryptHasher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env file (if present)
    dotenv().ok();

    // Friendly check for required env before we attempt to connect
    let app_config = Arc::new(AppConfig::from_env()?);
    app_config.jwt_secret()?;

    // Initialize tracing for structured logs
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Establish database connection (and run migrations)
    let db_pool = config::database::establish_connection(&app_config.database_url).await?;

    let hasher = Arc::new(BcryptHasher::new(app_config.bcrypt_cost));

    // Create the application router using library helper (CORS will be configured there)
    let app = create_app(db_pool, app_config.clone(), hasher)?;

    // Address to bind the server
    let addr = app_config.socket_addr()?;

    // Print the server address
    tracing::info!("Listening on http://{}", addr);

    // Start the server and handle shutdown via ctrl-c
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app.into_make_service());

    let shutdown_signal = async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
    };

    tokio::select! {
        res = server => {
            res.map_err(|e| {
                Box::<dyn std::error::Error + Send + Sync>::from(format!(
                    "Failed to serve application: {}",
                    e
                ))
            })?;
        }
        _ = shutdown_signal => {
            tracing::info!("Shutdown requested; exiting");
        }
    };

    Ok(())
}
