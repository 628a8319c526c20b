use std::net::SocketAddr;

use thiserror::Error;

/// Database configuration helpers
pub mod database;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set. Copy `.env.example` to `.env` and update it, or set it in your environment")]
    Missing(&'static str),
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub enabled: bool,
    /// `*` or a comma separated list of origins.
    pub allowed_origins: Option<String>,
}

/// Settings read from the environment (`.env` is loaded by the binaries).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    jwt_secret: Option<String>,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = parse_or(&lookup, "APP_PORT", 3002)?;
        let jwt_ttl_hours = parse_or(&lookup, "JWT_TTL_HOURS", 24)?;
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        let cors = CorsConfig {
            enabled: lookup("ENABLE_CORS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            database_url,
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            jwt_ttl_hours,
            bcrypt_cost,
            cors,
        })
    }

    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Only the HTTP server signs tokens, so the secret is checked lazily.
    pub fn jwt_secret(&self) -> Result<&str, ConfigError> {
        self.jwt_secret
            .as_deref()
            .ok_or(ConfigError::Missing("JWT_SECRET"))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "APP_HOST",
            value: raw,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
