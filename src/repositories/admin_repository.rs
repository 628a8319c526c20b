use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::errors::{AppError, ViolationList};
use crate::models::admin::Admin;
use crate::repositories::is_duplicate_entry;
use crate::services::admin_listener::AdminCreatedListener;

pub const EMAIL_ALREADY_USED: &str = "This email is already used";

/// Persistence seam for admin accounts.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_one_by_email(&self, email: &str) -> Result<Option<Admin>, AppError>;

    /// Insert a new admin and assign its id.
    async fn save(&self, admin: &mut Admin) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct AdminRepository {
    pool: MySqlPool,
    listener: Option<AdminCreatedListener>,
}

impl AdminRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            listener: None,
        }
    }

    /// Run `listener` on every admin right before it is inserted.
    pub fn with_listener(mut self, listener: AdminCreatedListener) -> Self {
        self.listener = Some(listener);
        self
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    async fn find_one_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password, first_name, last_name, created_at
            FROM admins
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn save(&self, admin: &mut Admin) -> Result<(), AppError> {
        if let Some(listener) = &self.listener {
            listener.pre_flush(admin).await?;
        }

        let password = admin
            .password
            .as_deref()
            .ok_or_else(|| AppError::Configuration("admin has no password hash".into()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO admins (email, password, first_name, last_name, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&admin.email)
        .bind(password)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .bind(admin.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => {
                admin.id = Some(res.last_insert_id() as i64);
                tracing::debug!(email = %admin.email, "admin row inserted");
                Ok(())
            }
            Err(e) if is_duplicate_entry(&e) => Err(AppError::Conflict(ViolationList::single(
                "email",
                EMAIL_ALREADY_USED,
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
