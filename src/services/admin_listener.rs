use std::sync::Arc;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::admin::Admin;
use crate::services::password_hasher::PasswordHasher;

/// Runs on a new admin right before it is inserted.
#[derive(Clone)]
pub struct AdminCreatedListener {
    hasher: Arc<dyn PasswordHasher>,
}

impl AdminCreatedListener {
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { hasher }
    }

    /// Hash a pending plain password into `password` and stamp `created_at`.
    pub async fn pre_flush(&self, admin: &mut Admin) -> Result<(), AppError> {
        if let Some(plain) = admin.plain_password.take() {
            admin.password = Some(self.hasher.hash(&plain).await?);
        }
        admin.ensure_created_at(Utc::now());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::StubHasher;

    #[tokio::test]
    async fn plain_password_is_consumed() {
        let listener = AdminCreatedListener::new(Arc::new(StubHasher));
        let mut admin = Admin::new("admin@mail.com");
        admin.plain_password = Some("secret".into());

        listener.pre_flush(&mut admin).await.unwrap();

        assert_eq!(admin.password.as_deref(), Some("hashed:secret"));
        assert!(admin.plain_password.is_none());
        assert!(admin.created_at().is_some());
    }

    #[tokio::test]
    async fn existing_hash_is_kept_without_plain_password() {
        let listener = AdminCreatedListener::new(Arc::new(StubHasher));
        let mut admin = Admin::new("admin@mail.com");
        admin.password = Some("already".into());

        listener.pre_flush(&mut admin).await.unwrap();

        assert_eq!(admin.password.as_deref(), Some("already"));
    }
}
