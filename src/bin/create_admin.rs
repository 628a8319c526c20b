use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;

use admin_users_api::commands::create_admin::{CreateAdminArgs, CreateAdminCommand};
use admin_users_api::commands::TerminalConsole;
use admin_users_api::config::{AppConfig, database};
use admin_users_api::repositories::admin_repository::AdminRepository;
use admin_users_api::services::admin_listener::AdminCreatedListener;
use admin_users_api::services::admin_user_manager::AdminUserManager;
use admin_users_api::services::password_hasher::BcryptHasher;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file (if present)
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = CreateAdminArgs::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CreateAdminArgs) -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;
    let pool = database::establish_connection(&config.database_url).await?;

    let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));
    let store = AdminRepository::new(pool).with_listener(AdminCreatedListener::new(hasher));
    let command = CreateAdminCommand::new(AdminUserManager::new(Arc::new(store)));

    let mut console = TerminalConsole::new();
    let status = command.execute(args, &mut console).await?;

    Ok(status.into())
}
