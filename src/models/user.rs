use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub uuid: String,
    pub email: String,
    /// Always a hash once persisted.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Unsaved user with a freshly generated v4 uuid.
    pub fn new() -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4().to_string(),
            email: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_a_uuid() {
        let a = User::new();
        let b = User::new();
        assert_eq!(a.uuid.len(), 36);
        assert_ne!(a.uuid, b.uuid);
        assert!(a.is_new());
    }
}
