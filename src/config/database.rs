use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Connect to MySQL and apply pending migrations.
pub async fn establish_connection(
    database_url: &str,
) -> Result<MySqlPool, Box<dyn std::error::Error + Send + Sync>> {
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to the database: {}", e);
            e
        })?;
    tracing::info!("Successfully connected to the database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied successfully");

    Ok(pool)
}
