use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Whether a category scores whole teams or individual athletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipationMode {
    Team,
    Individual,
}

impl ParticipationMode {
    pub fn expects_team(self) -> bool {
        matches!(self, ParticipationMode::Team)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub category_id: Uuid,
    pub name: String,
    pub participation_mode: ParticipationMode,
    pub created_at: chrono::NaiveDateTime,
}
