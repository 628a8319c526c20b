use async_trait::async_trait;
use tokio::time::{Duration, timeout};

use crate::errors::AppError;

/// One-way password hashing used for admins and API users alike.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String, AppError>;

    async fn verify(&self, hash: &str, plain: &str) -> Result<bool, AppError>;
}

/// Bcrypt on the blocking pool, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
    timeout_secs: u64,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            timeout_secs: 5,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

async fn run_blocking<T, F>(job: F, timeout_secs: u64, what: &str) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);

    match timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(AppError::Hashing(e.to_string())),
        Ok(Err(join_err)) => Err(AppError::Hashing(join_err.to_string())),
        Err(_) => Err(AppError::Hashing(format!("password {} timed out", what))),
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plain: &str) -> Result<String, AppError> {
        let plain = plain.to_owned();
        let cost = self.cost;
        run_blocking(move || bcrypt::hash(&plain, cost), self.timeout_secs, "hashing").await
    }

    async fn verify(&self, hash: &str, plain: &str) -> Result<bool, AppError> {
        let plain = plain.to_owned();
        let hash = hash.to_owned();
        run_blocking(
            move || bcrypt::verify(&plain, &hash),
            self.timeout_secs,
            "verification",
        )
        .await
    }
}
