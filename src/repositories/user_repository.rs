use sqlx::MySqlPool;

use crate::errors::{AppError, ViolationList};
use crate::models::user::User;
use crate::repositories::is_duplicate_entry;

pub const VALUE_ALREADY_USED: &str = "This value is already used.";

/// Columns that must be unique across users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Uuid,
    Email,
}

impl UniqueField {
    pub const ALL: [UniqueField; 2] = [UniqueField::Uuid, UniqueField::Email];

    pub fn column(&self) -> &'static str {
        match self {
            UniqueField::Uuid => "uuid",
            UniqueField::Email => "email",
        }
    }

    pub fn value<'a>(&self, user: &'a User) -> &'a str {
        match self {
            UniqueField::Uuid => &user.uuid,
            UniqueField::Email => &user.email,
        }
    }
}

const USER_COLUMNS: &str = "id, uuid, email, password, first_name, last_name";

#[derive(Clone)]
pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id ASC LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// First user holding `value` in `field`, ignoring `exclude_id`.
    pub async fn find_one_by(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE {} = ? AND (? IS NULL OR id <> ?) LIMIT 1",
            USER_COLUMNS,
            field.column()
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .bind(exclude_id)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Unique columns of `user` already held by another row.
    pub async fn conflicts(&self, user: &User) -> Result<ViolationList, AppError> {
        let mut violations = ViolationList::new();
        for field in UniqueField::ALL {
            if self
                .find_one_by(field, field.value(user), user.id)
                .await?
                .is_some()
            {
                violations.add(field.column(), VALUE_ALREADY_USED);
            }
        }
        Ok(violations)
    }

    pub async fn insert(&self, user: &mut User) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (uuid, email, password, first_name, last_name)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.uuid)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await
        .map_err(duplicate_as_conflict)?;

        user.id = Some(result.last_insert_id() as i64);
        Ok(())
    }

    pub async fn update(&self, user: &User) -> Result<(), AppError> {
        let id = user.id.ok_or(AppError::NotFound)?;

        sqlx::query(
            r#"
            UPDATE users
            SET uuid = ?, email = ?, password = ?, first_name = ?, last_name = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.uuid)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(duplicate_as_conflict)?;

        Ok(())
    }

    /// Returns false when no row had that id.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// A concurrent writer can still win the race after the pre-check.
fn duplicate_as_conflict(e: sqlx::Error) -> AppError {
    if !is_duplicate_entry(&e) {
        return e.into();
    }
    let field = match &e {
        sqlx::Error::Database(db_err) => duplicated_field(db_err.message()),
        _ => UniqueField::Email,
    };
    AppError::Conflict(ViolationList::single(field.column(), VALUE_ALREADY_USED))
}

/// Unique column named by a MySQL "Duplicate entry '..' for key '..'" message.
/// The key may carry a table prefix (`users.uuid`) depending on the server.
fn duplicated_field(message: &str) -> UniqueField {
    let key = message
        .rsplit_once("for key '")
        .map(|(_, rest)| rest.trim_end_matches('\''))
        .unwrap_or_default();
    let key = key.rsplit('.').next().unwrap_or(key);
    UniqueField::ALL
        .into_iter()
        .find(|field| field.column() == key)
        .unwrap_or(UniqueField::Email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_names_the_colliding_column() {
        let cases = [
            ("Duplicate entry 'abc' for key 'users.uuid'", UniqueField::Uuid),
            ("Duplicate entry 'abc' for key 'uuid'", UniqueField::Uuid),
            ("Duplicate entry 'a@b.c' for key 'users.email'", UniqueField::Email),
            ("Duplicate entry 'a@b.c' for key 'email'", UniqueField::Email),
        ];
        for (message, expected) in cases {
            assert_eq!(duplicated_field(message), expected, "{message}");
        }
    }

    #[test]
    fn unknown_key_falls_back_to_email() {
        assert_eq!(duplicated_field("Duplicate entry '1' for key 'PRIMARY'"), UniqueField::Email);
        assert_eq!(duplicated_field("deadlock"), UniqueField::Email);
    }
}
