use std::sync::Arc;

use crate::errors::AppError;
use crate::models::admin::Admin;
use crate::repositories::admin_repository::AdminStore;

/// Admin account operations shared by the console commands.
#[derive(Clone)]
pub struct AdminUserManager {
    store: Arc<dyn AdminStore>,
}

impl AdminUserManager {
    pub fn new(store: Arc<dyn AdminStore>) -> Self {
        Self { store }
    }

    pub async fn email_is_unique(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.store.find_one_by_email(email).await?.is_none())
    }

    /// Persist a new admin. The password is hashed by the store's pre-flush
    /// listener, so the returned admin never carries the plain text.
    pub async fn create_admin(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Admin, AppError> {
        let mut admin = Admin::new(email);
        admin.plain_password = Some(password.to_owned());
        admin.first_name = first_name;
        admin.last_name = last_name;

        self.store.save(&mut admin).await?;
        tracing::debug!(id = ?admin.id, "admin persisted");

        Ok(admin)
    }
}
