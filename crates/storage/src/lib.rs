use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use error::Result;
use services::locks::CategoryLocks;

/// Shared application handle: the connection pool plus the per-category
/// writer locks that serialize ranking and aggregation.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    locks: Arc<CategoryLocks>,
}

impl Database {
    pub async fn new(database_url: &str, lock_wait: Duration) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self {
            pool,
            locks: Arc::new(CategoryLocks::new(lock_wait)),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn locks(&self) -> &CategoryLocks {
        &self.locks
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
