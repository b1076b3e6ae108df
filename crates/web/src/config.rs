use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// How long a submission may wait for its category's writer lock
    /// before being rejected as retryable.
    pub lock_wait_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            lock_wait_ms: match std::env::var("LOCK_WAIT_MS") {
                Ok(raw) => raw.parse().context("LOCK_WAIT_MS must be a number")?,
                Err(_) => 5000,
            },
        })
    }
}
