use sqlx::PgPool;
use storage::{
    Database,
    dto::results::{
        BatchFailureResponse, BatchSubmitRequest, BatchSubmitResponse, ParticipantResultEntry,
        SubmitResultRequest, WorkoutResultEntry, WorkoutResultResponse,
    },
    error::ScoringResult,
    services::{gateway, standings},
};
use uuid::Uuid;

/// Record one result and report it back with its fresh position.
pub async fn submit_result(
    db: &Database,
    category_id: Uuid,
    workout_id: Uuid,
    request: &SubmitResultRequest,
) -> ScoringResult<WorkoutResultResponse> {
    let record = gateway::submit_result(db, category_id, workout_id, request).await?;
    Ok(WorkoutResultResponse::from(&record))
}

/// Apply a result sheet, reporting per-item rejections alongside the
/// applied records.
pub async fn submit_batch(
    db: &Database,
    category_id: Uuid,
    workout_id: Uuid,
    request: &BatchSubmitRequest,
) -> ScoringResult<BatchSubmitResponse> {
    let outcome = gateway::submit_batch(db, category_id, workout_id, &request.results).await?;

    Ok(BatchSubmitResponse {
        applied: outcome.results.len(),
        results: outcome
            .results
            .iter()
            .map(WorkoutResultResponse::from)
            .collect(),
        failures: outcome
            .failures
            .into_iter()
            .map(|failure| BatchFailureResponse {
                index: failure.index,
                participant_id: failure.participant_id,
                code: failure.code.to_string(),
                detail: failure.detail,
            })
            .collect(),
    })
}

/// Remove a participant's result from a workout.
pub async fn remove_result(
    db: &Database,
    workout_id: Uuid,
    participant_id: Uuid,
    is_team: bool,
) -> ScoringResult<()> {
    gateway::remove_result(db, workout_id, participant_id, is_team).await
}

/// A workout's results in rank order.
pub async fn workout_results(
    pool: &PgPool,
    category_id: Uuid,
    workout_id: Uuid,
) -> ScoringResult<Vec<WorkoutResultEntry>> {
    standings::workout_results(pool, category_id, workout_id).await
}

/// One participant's results across workouts.
pub async fn participant_results(
    pool: &PgPool,
    participant_id: Uuid,
) -> ScoringResult<Vec<ParticipantResultEntry>> {
    standings::participant_results(pool, participant_id).await
}
