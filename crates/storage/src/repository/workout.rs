use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Workout;

pub struct WorkoutRepository;

impl WorkoutRepository {
    pub async fn find_by_id(ex: impl PgExecutor<'_>, workout_id: Uuid) -> Result<Workout> {
        sqlx::query_as::<_, Workout>(
            r#"
            SELECT workout_id, category_id, name, result_type, created_at
            FROM workouts
            WHERE workout_id = $1
            "#,
        )
        .bind(workout_id)
        .fetch_optional(ex)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn list_for_category(
        ex: impl PgExecutor<'_>,
        category_id: Uuid,
    ) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT workout_id, category_id, name, result_type, created_at
            FROM workouts
            WHERE category_id = $1
            ORDER BY created_at, workout_id
            "#,
        )
        .bind(category_id)
        .fetch_all(ex)
        .await?;

        Ok(workouts)
    }
}
