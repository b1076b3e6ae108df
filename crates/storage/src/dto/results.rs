use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{RawResultValue, WorkoutResult};

/// One performance submission for a participant in a workout. Submitting
/// again for the same participant overwrites the previous value.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitResultRequest {
    pub participant_id: Uuid,
    pub is_team: bool,
    pub value: RawResultValue,
    #[serde(default)]
    pub finalized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchResultItem {
    pub participant_id: Uuid,
    pub is_team: bool,
    pub value: RawResultValue,
    #[serde(default)]
    pub finalized: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchSubmitRequest {
    #[validate(length(min = 1, max = 500, message = "results must hold between 1 and 500 items"))]
    pub results: Vec<BatchResultItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutResultResponse {
    pub result_id: Uuid,
    pub category_id: Uuid,
    pub workout_id: Uuid,
    pub participant_id: Uuid,
    pub is_team: bool,
    /// Display rendering of the stored value ("21", "102.5", "1:05").
    pub value: Option<String>,
    pub position: Option<i32>,
    pub finalized: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl From<&WorkoutResult> for WorkoutResultResponse {
    fn from(record: &WorkoutResult) -> Self {
        Self {
            result_id: record.result_id,
            category_id: record.category_id,
            workout_id: record.workout_id,
            participant_id: record.participant.uuid(),
            is_team: record.participant.is_team(),
            value: record.value.as_ref().map(|v| v.format()),
            position: record.position,
            finalized: record.finalized,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// One row of a workout's ordered result list.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutResultEntry {
    pub participant_id: Uuid,
    pub is_team: bool,
    pub display_name: String,
    pub position: Option<i32>,
    pub value: Option<String>,
    pub finalized: bool,
}

/// One of a participant's results, annotated with its workout.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantResultEntry {
    pub category_id: Uuid,
    pub workout_id: Uuid,
    pub workout_name: String,
    pub value: Option<String>,
    pub position: Option<i32>,
    pub finalized: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchFailureResponse {
    pub index: usize,
    pub participant_id: Uuid,
    pub code: String,
    pub detail: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchSubmitResponse {
    pub applied: usize,
    pub results: Vec<WorkoutResultResponse>,
    pub failures: Vec<BatchFailureResponse>,
}
