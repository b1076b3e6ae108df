use std::collections::{HashMap, HashSet};

use sqlx::PgConnection;
use uuid::Uuid;

use crate::Database;
use crate::dto::results::{BatchResultItem, SubmitResultRequest};
use crate::error::{ScoringError, ScoringResult, StorageError, ValidationFailure};
use crate::models::{Category, ParticipantId, ResultValue, Workout, WorkoutResult};
use crate::repository::category::CategoryRepository;
use crate::repository::participant::ParticipantRepository;
use crate::repository::result_record::{NewWorkoutResult, WorkoutResultRepository};
use crate::repository::workout::WorkoutRepository;
use crate::services::{ranking, scoring};

#[derive(Debug)]
pub struct BatchFailure {
    pub index: usize,
    pub participant_id: Uuid,
    pub code: &'static str,
    pub detail: String,
}

#[derive(Debug)]
pub struct BatchOutcome {
    /// Upserted records carrying their post-ranking positions.
    pub results: Vec<WorkoutResult>,
    pub failures: Vec<BatchFailure>,
}

/// Record one result: validate, normalize, upsert, then re-rank the workout
/// and re-aggregate the category, all inside one transaction held under the
/// category's writer lock. Returns the record with its fresh position.
pub async fn submit_result(
    db: &Database,
    category_id: Uuid,
    workout_id: Uuid,
    request: &SubmitResultRequest,
) -> ScoringResult<WorkoutResult> {
    let _guard = db.locks().acquire(category_id).await?;
    let mut tx = db.pool().begin().await.map_err(StorageError::from)?;

    let (category, workout) = load_category_workout(&mut tx, category_id, workout_id).await?;
    let participant = resolve_participant(
        &mut tx,
        &category,
        request.participant_id,
        request.is_team,
    )
    .await?;
    let value = workout.result_type.normalize(&request.value)?;

    let record = upsert_record(&mut tx, &workout, participant, value, request.finalized).await?;
    let ranked = ranking::rank_workout(&mut tx, category_id, workout_id).await?;
    scoring::recalculate_category_scores(&mut tx, category_id).await?;

    tx.commit().await.map_err(StorageError::from)?;

    let position = ranked
        .iter()
        .find(|r| r.result_id == record.result_id)
        .map(|r| r.position);

    tracing::info!(
        %category_id,
        %workout_id,
        participant_id = %participant.uuid(),
        position = ?position,
        "result recorded"
    );

    Ok(WorkoutResult { position, ..record })
}

/// Apply a whole sheet of results for one workout, then rank and aggregate
/// once. Items that fail validation are reported back with their index and
/// reason code instead of aborting the remaining items; only infrastructure
/// errors abort (and roll back) the batch.
pub async fn submit_batch(
    db: &Database,
    category_id: Uuid,
    workout_id: Uuid,
    items: &[BatchResultItem],
) -> ScoringResult<BatchOutcome> {
    let _guard = db.locks().acquire(category_id).await?;
    let mut tx = db.pool().begin().await.map_err(StorageError::from)?;

    let (category, workout) = load_category_workout(&mut tx, category_id, workout_id).await?;

    let mut seen = HashSet::new();
    let mut results: Vec<WorkoutResult> = Vec::new();
    let mut failures: Vec<BatchFailure> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match apply_batch_item(&mut tx, &category, &workout, item, &mut seen).await {
            Ok(record) => results.push(record),
            Err(error @ ScoringError::Storage(_)) => return Err(error),
            Err(error) => failures.push(BatchFailure {
                index,
                participant_id: item.participant_id,
                code: error.code(),
                detail: error.to_string(),
            }),
        }
    }

    if !results.is_empty() {
        let ranked = ranking::rank_workout(&mut tx, category_id, workout_id).await?;
        scoring::recalculate_category_scores(&mut tx, category_id).await?;

        let positions: HashMap<Uuid, i32> =
            ranked.iter().map(|r| (r.result_id, r.position)).collect();
        for record in &mut results {
            record.position = positions.get(&record.result_id).copied();
        }
    }

    tx.commit().await.map_err(StorageError::from)?;

    tracing::info!(
        %category_id,
        %workout_id,
        applied = results.len(),
        rejected = failures.len(),
        "result batch processed"
    );

    Ok(BatchOutcome { results, failures })
}

/// Drop a participant's result, then renumber the workout and refresh the
/// category totals so the remaining records close the gap.
pub async fn remove_result(
    db: &Database,
    workout_id: Uuid,
    participant_id: Uuid,
    is_team: bool,
) -> ScoringResult<()> {
    let workout = WorkoutRepository::find_by_id(db.pool(), workout_id)
        .await
        .map_err(|e| e.or_not_found("workout"))?;

    let _guard = db.locks().acquire(workout.category_id).await?;
    let mut tx = db.pool().begin().await.map_err(StorageError::from)?;

    let participant = ParticipantId::new(participant_id, is_team);
    let record = WorkoutResultRepository::find_for_participant(&mut *tx, workout_id, participant)
        .await?
        .ok_or(ScoringError::NotFound("result"))?;

    WorkoutResultRepository::delete(&mut *tx, record.result_id).await?;
    ranking::rank_workout(&mut tx, workout.category_id, workout_id).await?;
    scoring::recalculate_category_scores(&mut tx, workout.category_id).await?;

    tx.commit().await.map_err(StorageError::from)?;

    tracing::info!(
        category_id = %workout.category_id,
        %workout_id,
        %participant_id,
        "result removed"
    );

    Ok(())
}

async fn apply_batch_item(
    conn: &mut PgConnection,
    category: &Category,
    workout: &Workout,
    item: &BatchResultItem,
    seen: &mut HashSet<Uuid>,
) -> ScoringResult<WorkoutResult> {
    if !seen.insert(item.participant_id) {
        return Err(ValidationFailure::DuplicateParticipant.into());
    }

    let participant =
        resolve_participant(conn, category, item.participant_id, item.is_team).await?;
    let value = workout.result_type.normalize(&item.value)?;

    upsert_record(conn, workout, participant, value, item.finalized).await
}

async fn load_category_workout(
    conn: &mut PgConnection,
    category_id: Uuid,
    workout_id: Uuid,
) -> ScoringResult<(Category, Workout)> {
    let category = CategoryRepository::find_by_id(&mut *conn, category_id)
        .await
        .map_err(|e| e.or_not_found("category"))?;
    let workout = WorkoutRepository::find_by_id(&mut *conn, workout_id)
        .await
        .map_err(|e| e.or_not_found("workout"))?;

    if workout.category_id != category.category_id {
        return Err(ScoringError::NotFound("workout"));
    }

    Ok((category, workout))
}

/// Check the submission against the category: the participant kind must
/// match the participation mode, and the competitor must be registered in
/// this category and still eligible.
async fn resolve_participant(
    conn: &mut PgConnection,
    category: &Category,
    participant_id: Uuid,
    is_team: bool,
) -> ScoringResult<ParticipantId> {
    if category.participation_mode.expects_team() != is_team {
        return Err(ValidationFailure::ParticipantTypeMismatch.into());
    }

    if is_team {
        let team = ParticipantRepository::find_team(&mut *conn, participant_id)
            .await
            .map_err(|e| e.or_not_found("team"))?;
        if team.category_id != category.category_id || !team.is_eligible() {
            return Err(ValidationFailure::IneligibleParticipant.into());
        }
        Ok(ParticipantId::Team(team.team_id))
    } else {
        let athlete = ParticipantRepository::find_athlete(&mut *conn, participant_id)
            .await
            .map_err(|e| e.or_not_found("athlete"))?;
        if athlete.category_id != category.category_id || !athlete.is_eligible() {
            return Err(ValidationFailure::IneligibleParticipant.into());
        }
        Ok(ParticipantId::Athlete(athlete.athlete_id))
    }
}

async fn upsert_record(
    conn: &mut PgConnection,
    workout: &Workout,
    participant: ParticipantId,
    value: ResultValue,
    finalized: bool,
) -> ScoringResult<WorkoutResult> {
    let existing =
        WorkoutResultRepository::find_for_participant(&mut *conn, workout.workout_id, participant)
            .await?;

    let record = match existing {
        Some(record) => {
            WorkoutResultRepository::update_value(&mut *conn, record.result_id, &value, finalized)
                .await?
        }
        None => {
            WorkoutResultRepository::insert(
                &mut *conn,
                &NewWorkoutResult {
                    category_id: workout.category_id,
                    workout_id: workout.workout_id,
                    participant,
                    value,
                    finalized,
                },
            )
            .await?
        }
    };

    Ok(record)
}
