use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{ParticipantId, ResultType, ResultValue, WorkoutResult};

const RESULT_COLUMNS: &str = "result_id, category_id, workout_id, team_id, athlete_id, \
     value_reps, value_weight, value_seconds, rank AS position, finalized, created_at, updated_at";

#[derive(FromRow)]
struct WorkoutResultRow {
    result_id: Uuid,
    category_id: Uuid,
    workout_id: Uuid,
    team_id: Option<Uuid>,
    athlete_id: Option<Uuid>,
    value_reps: Option<i32>,
    value_weight: Option<Decimal>,
    value_seconds: Option<i32>,
    position: i32,
    finalized: bool,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
}

impl WorkoutResultRow {
    fn into_domain(self) -> Result<WorkoutResult> {
        let participant = match (self.team_id, self.athlete_id) {
            (Some(team_id), None) => ParticipantId::Team(team_id),
            (None, Some(athlete_id)) => ParticipantId::Athlete(athlete_id),
            _ => {
                return Err(StorageError::Inconsistent(format!(
                    "result {} does not reference exactly one participant",
                    self.result_id
                )));
            }
        };

        Ok(WorkoutResult {
            result_id: self.result_id,
            category_id: self.category_id,
            workout_id: self.workout_id,
            participant,
            value: ResultValue::from_columns(self.value_reps, self.value_weight, self.value_seconds),
            position: (self.position > 0).then_some(self.position),
            finalized: self.finalized,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A participant's result joined with its workout, for the cross-workout
/// read path.
#[derive(Debug, FromRow)]
pub struct ParticipantResultRow {
    pub category_id: Uuid,
    pub workout_id: Uuid,
    pub workout_name: String,
    pub result_type: ResultType,
    pub value_reps: Option<i32>,
    pub value_weight: Option<Decimal>,
    pub value_seconds: Option<i32>,
    pub position: i32,
    pub finalized: bool,
}

#[derive(Debug)]
pub struct NewWorkoutResult {
    pub category_id: Uuid,
    pub workout_id: Uuid,
    pub participant: ParticipantId,
    pub value: ResultValue,
    pub finalized: bool,
}

pub struct WorkoutResultRepository;

impl WorkoutResultRepository {
    pub async fn list_for_workout(
        ex: impl PgExecutor<'_>,
        workout_id: Uuid,
    ) -> Result<Vec<WorkoutResult>> {
        let rows = sqlx::query_as::<_, WorkoutResultRow>(&format!(
            r#"
            SELECT {RESULT_COLUMNS}
            FROM workout_results
            WHERE workout_id = $1
            ORDER BY (rank = 0), rank, created_at
            "#
        ))
        .bind(workout_id)
        .fetch_all(ex)
        .await?;

        rows.into_iter().map(WorkoutResultRow::into_domain).collect()
    }

    pub async fn list_for_category(
        ex: impl PgExecutor<'_>,
        category_id: Uuid,
    ) -> Result<Vec<WorkoutResult>> {
        let rows = sqlx::query_as::<_, WorkoutResultRow>(&format!(
            r#"
            SELECT {RESULT_COLUMNS}
            FROM workout_results
            WHERE category_id = $1
            ORDER BY workout_id, (rank = 0), rank
            "#
        ))
        .bind(category_id)
        .fetch_all(ex)
        .await?;

        rows.into_iter().map(WorkoutResultRow::into_domain).collect()
    }

    pub async fn find_for_participant(
        ex: impl PgExecutor<'_>,
        workout_id: Uuid,
        participant: ParticipantId,
    ) -> Result<Option<WorkoutResult>> {
        let row = sqlx::query_as::<_, WorkoutResultRow>(&format!(
            r#"
            SELECT {RESULT_COLUMNS}
            FROM workout_results
            WHERE workout_id = $1
              AND team_id IS NOT DISTINCT FROM $2
              AND athlete_id IS NOT DISTINCT FROM $3
            "#
        ))
        .bind(workout_id)
        .bind(participant.team_column())
        .bind(participant.athlete_column())
        .fetch_optional(ex)
        .await?;

        row.map(WorkoutResultRow::into_domain).transpose()
    }

    /// A participant's results across all workouts, newest workout last.
    pub async fn list_for_participant(
        ex: impl PgExecutor<'_>,
        participant_id: Uuid,
    ) -> Result<Vec<ParticipantResultRow>> {
        let rows = sqlx::query_as::<_, ParticipantResultRow>(
            r#"
            SELECT r.category_id, r.workout_id, w.name AS workout_name, w.result_type,
                   r.value_reps, r.value_weight, r.value_seconds, r.rank AS position, r.finalized
            FROM workout_results r
            JOIN workouts w ON w.workout_id = r.workout_id
            WHERE r.team_id = $1 OR r.athlete_id = $1
            ORDER BY w.created_at, w.workout_id
            "#,
        )
        .bind(participant_id)
        .fetch_all(ex)
        .await?;

        Ok(rows)
    }

    pub async fn insert(ex: impl PgExecutor<'_>, new: &NewWorkoutResult) -> Result<WorkoutResult> {
        let row = sqlx::query_as::<_, WorkoutResultRow>(&format!(
            r#"
            INSERT INTO workout_results
                (category_id, workout_id, team_id, athlete_id,
                 value_reps, value_weight, value_seconds, finalized)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(new.category_id)
        .bind(new.workout_id)
        .bind(new.participant.team_column())
        .bind(new.participant.athlete_column())
        .bind(new.value.reps_column())
        .bind(new.value.weight_column())
        .bind(new.value.seconds_column())
        .bind(new.finalized)
        .fetch_one(ex)
        .await?;

        row.into_domain()
    }

    /// Replace the stored value and finalized flag, clearing any column the
    /// new value does not use.
    pub async fn update_value(
        ex: impl PgExecutor<'_>,
        result_id: Uuid,
        value: &ResultValue,
        finalized: bool,
    ) -> Result<WorkoutResult> {
        let row = sqlx::query_as::<_, WorkoutResultRow>(&format!(
            r#"
            UPDATE workout_results
            SET value_reps = $2,
                value_weight = $3,
                value_seconds = $4,
                finalized = $5,
                updated_at = NOW()
            WHERE result_id = $1
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(result_id)
        .bind(value.reps_column())
        .bind(value.weight_column())
        .bind(value.seconds_column())
        .bind(finalized)
        .fetch_optional(ex)
        .await?
        .ok_or(StorageError::NotFound)?;

        row.into_domain()
    }

    pub async fn update_position(
        ex: impl PgExecutor<'_>,
        result_id: Uuid,
        position: i32,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE workout_results SET rank = $2 WHERE result_id = $1")
            .bind(result_id)
            .bind(position)
            .execute(ex)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn delete(ex: impl PgExecutor<'_>, result_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM workout_results WHERE result_id = $1")
            .bind(result_id)
            .execute(ex)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
