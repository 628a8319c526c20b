pub mod admin_listener;
pub mod admin_user_manager;
pub mod password_hasher;
