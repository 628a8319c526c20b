pub mod login_handler;
pub mod user_handler;
