use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Category;

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn find_by_id(ex: impl PgExecutor<'_>, category_id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, participation_mode, created_at
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(ex)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
