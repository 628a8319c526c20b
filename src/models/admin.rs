use chrono::{DateTime, Utc};

/// Back-office account allowed to log in and manage users.
///
/// `plain_password` is never stored; the pre-flush listener turns it into
/// `password` right before the row is written.
#[derive(sqlx::FromRow, Debug, Clone, Default, PartialEq)]
pub struct Admin {
    pub id: Option<i64>,
    pub email: String,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sqlx(skip)]
    pub plain_password: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl Admin {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Set the creation time unless it is already set.
    pub fn ensure_created_at(&mut self, now: DateTime<Utc>) {
        self.created_at.get_or_insert(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn created_at_is_set_once() {
        let mut admin = Admin::new("admin@mail.com");
        assert!(admin.created_at().is_none());

        let first = Utc::now();
        admin.ensure_created_at(first);
        admin.ensure_created_at(first + Duration::hours(1));
        assert_eq!(admin.created_at(), Some(first));
    }
}
