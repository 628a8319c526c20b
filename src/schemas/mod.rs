pub mod login_schema;
pub mod user_schema;

use crate::mapper::{MappingError, register};
use crate::models::user::User;

pub use crate::schemas::login_schema::{LoginSchema, TokenResponseSchema};
pub use crate::schemas::user_schema::{UserInput, UserInputPayload, UserOutput, ValidationGroup};

/// Register the field tables of every DTO. Called once at startup.
pub fn register_projections() -> Result<(), MappingError> {
    register::<UserInput, User>()?;
    register::<UserOutput, User>()?;
    Ok(())
}
