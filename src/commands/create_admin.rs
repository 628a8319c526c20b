use clap::Parser;

use crate::commands::{Argument, CommandStatus, Console, OutputType, Resolution, get_or_ask_argument};
use crate::errors::AppError;
use crate::repositories::admin_repository::EMAIL_ALREADY_USED;
use crate::services::admin_user_manager::AdminUserManager;
use crate::validators::FieldValidator;

pub const COMMAND_NAME: &str = "app:create-admin";

/// Create a new admin user
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "create-admin")]
#[command(about = "Create a new admin user")]
#[command(long_about = "This command allows you to create an admin")]
pub struct CreateAdminArgs {
    /// The admin email (username)
    pub email: Option<String>,
    /// The admin password
    pub password: Option<String>,
    /// The admin first name
    #[arg(value_name = "FIRST_NAME")]
    pub first_name: Option<String>,
    /// The admin last name
    #[arg(value_name = "LAST_NAME")]
    pub last_name: Option<String>,
}

pub struct CreateAdminCommand {
    manager: AdminUserManager,
}

impl CreateAdminCommand {
    pub fn new(manager: AdminUserManager) -> Self {
        Self { manager }
    }

    /// Resolve the four arguments in order and stop at the first rejected
    /// one. Nothing is persisted unless every step passes.
    pub async fn execute<C: Console + ?Sized>(
        &self,
        args: CreateAdminArgs,
        console: &mut C,
    ) -> Result<CommandStatus, AppError> {
        let email = match get_or_ask_argument(
            console,
            args.email,
            &Argument::new("email").question("Email: "),
            Some(&mut FieldValidator::email()),
        )? {
            Resolution::Accepted(Some(email)) => email,
            _ => return Ok(CommandStatus::Failure),
        };

        if !self.manager.email_is_unique(&email).await? {
            tracing::warn!(%email, "admin email already used");
            console.write(EMAIL_ALREADY_USED, OutputType::Error)?;
            return Ok(CommandStatus::Failure);
        }

        let password = match get_or_ask_argument(
            console,
            args.password,
            &Argument::new("password").question("Password: "),
            Some(&mut FieldValidator::password()),
        )? {
            Resolution::Accepted(Some(password)) => password,
            _ => return Ok(CommandStatus::Failure),
        };

        let Resolution::Accepted(first_name) = get_or_ask_argument(
            console,
            args.first_name,
            &Argument::new("firstName").question("First name: ").optional(),
            Some(&mut FieldValidator::name()),
        )?
        else {
            return Ok(CommandStatus::Failure);
        };

        let Resolution::Accepted(last_name) = get_or_ask_argument(
            console,
            args.last_name,
            &Argument::new("lastName").question("Last name: ").optional(),
            Some(&mut FieldValidator::name()),
        )?
        else {
            return Ok(CommandStatus::Failure);
        };

        match self
            .manager
            .create_admin(&email, &password, first_name, last_name)
            .await
        {
            Ok(_) => tracing::info!(command = COMMAND_NAME, %email, "admin created"),
            Err(AppError::Conflict(_)) => {
                console.write(EMAIL_ALREADY_USED, OutputType::Error)?;
                return Ok(CommandStatus::Failure);
            }
            Err(e) => return Err(e),
        }
        console.write(&format!("Admin {} created\n", email), OutputType::Info)?;

        Ok(CommandStatus::Success)
    }
}
