use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::{ScoringError, ScoringResult};

/// Per-category writer locks. Ranking and aggregation read the whole result
/// set of a category before writing it back, so two concurrent submissions
/// into the same category must be serialized; submissions into different
/// categories proceed independently.
pub struct CategoryLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
    wait_timeout: Duration,
}

impl CategoryLocks {
    pub fn new(wait_timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            wait_timeout,
        }
    }

    /// Take the category's lock, waiting up to the configured timeout.
    /// Timing out maps to the retryable `CategoryLocked` error.
    pub async fn acquire(&self, category_id: Uuid) -> ScoringResult<OwnedMutexGuard<()>> {
        let lock = self
            .locks
            .entry(category_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();

        tokio::time::timeout(self.wait_timeout, lock.lock_owned())
            .await
            .map_err(|_| ScoringError::CategoryLocked(category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locks() -> CategoryLocks {
        CategoryLocks::new(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn same_category_serializes() {
        let locks = locks();
        let category = Uuid::from_u128(1);

        let guard = locks.acquire(category).await.unwrap();
        let blocked = locks.acquire(category).await;
        assert!(matches!(blocked, Err(ScoringError::CategoryLocked(id)) if id == category));

        drop(guard);
        assert!(locks.acquire(category).await.is_ok());
    }

    #[tokio::test]
    async fn distinct_categories_do_not_contend() {
        let locks = locks();

        let _first = locks.acquire(Uuid::from_u128(1)).await.unwrap();
        assert!(locks.acquire(Uuid::from_u128(2)).await.is_ok());
    }
}
