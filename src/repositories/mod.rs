pub mod admin_repository;
pub mod user_repository;

/// True when an insert or update hit a unique key (MySQL error 1062).
pub fn is_duplicate_entry(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                || db_err.message().to_lowercase().contains("duplicate")
        }
        _ => err.to_string().contains("1062"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_duplicates() {
        assert!(!is_duplicate_entry(&sqlx::Error::RowNotFound));
        assert!(!is_duplicate_entry(&sqlx::Error::PoolTimedOut));
    }
}
