use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::{
    Database,
    dto::results::{
        BatchSubmitRequest, BatchSubmitResponse, ParticipantResultEntry, SubmitResultRequest,
        WorkoutResultEntry, WorkoutResultResponse,
    },
};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RemoveResultQuery {
    /// Whether the participant id names a team rather than an athlete.
    #[serde(default)]
    pub team: bool,
}

#[utoipa::path(
    post,
    path = "/api/categories/{category_id}/workouts/{workout_id}/results",
    params(
        ("category_id" = Uuid, Path, description = "Category id"),
        ("workout_id" = Uuid, Path, description = "Workout id")
    ),
    request_body = SubmitResultRequest,
    responses(
        (status = 200, description = "Result recorded and ranked", body = WorkoutResultResponse),
        (status = 400, description = "Rejected submission, body carries the reason code"),
        (status = 404, description = "Category, workout or participant not found"),
        (status = 409, description = "Category busy recomputing scores, retry")
    ),
    tag = "results"
)]
pub async fn submit_result(
    State(db): State<Database>,
    Path((category_id, workout_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<SubmitResultRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let response = services::submit_result(&db, category_id, workout_id, &request).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/categories/{category_id}/workouts/{workout_id}/results/batch",
    params(
        ("category_id" = Uuid, Path, description = "Category id"),
        ("workout_id" = Uuid, Path, description = "Workout id")
    ),
    request_body = BatchSubmitRequest,
    responses(
        (status = 200, description = "Batch processed, rejected items listed per index", body = BatchSubmitResponse),
        (status = 404, description = "Category or workout not found"),
        (status = 409, description = "Category busy recomputing scores, retry")
    ),
    tag = "results"
)]
pub async fn submit_result_batch(
    State(db): State<Database>,
    Path((category_id, workout_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<BatchSubmitRequest>,
) -> Result<Response, WebError> {
    request.validate()?;

    let response = services::submit_batch(&db, category_id, workout_id, &request).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{workout_id}/results/{participant_id}",
    params(
        ("workout_id" = Uuid, Path, description = "Workout id"),
        ("participant_id" = Uuid, Path, description = "Team or athlete id"),
        RemoveResultQuery
    ),
    responses(
        (status = 204, description = "Result removed, workout renumbered"),
        (status = 404, description = "Workout or result not found"),
        (status = 409, description = "Category busy recomputing scores, retry")
    ),
    tag = "results"
)]
pub async fn remove_result(
    State(db): State<Database>,
    Path((workout_id, participant_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<RemoveResultQuery>,
) -> Result<Response, WebError> {
    services::remove_result(&db, workout_id, participant_id, query.team).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{category_id}/workouts/{workout_id}/results",
    params(
        ("category_id" = Uuid, Path, description = "Category id"),
        ("workout_id" = Uuid, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Results in rank order", body = Vec<WorkoutResultEntry>),
        (status = 404, description = "Category or workout not found")
    ),
    tag = "results"
)]
pub async fn get_workout_results(
    State(db): State<Database>,
    Path((category_id, workout_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let entries = services::workout_results(db.pool(), category_id, workout_id).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{participant_id}/results",
    params(
        ("participant_id" = Uuid, Path, description = "Team or athlete id")
    ),
    responses(
        (status = 200, description = "The participant's results across workouts", body = Vec<ParticipantResultEntry>)
    ),
    tag = "results"
)]
pub async fn get_participant_results(
    State(db): State<Database>,
    Path(participant_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let entries = services::participant_results(db.pool(), participant_id).await?;

    Ok(Json(entries).into_response())
}
