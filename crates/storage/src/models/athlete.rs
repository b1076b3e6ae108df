use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub athlete_id: Uuid,
    pub category_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub accepted_terms: bool,
    pub total_score: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl Athlete {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// An athlete only receives results while registered as active and
    /// after accepting the competition terms.
    pub fn is_eligible(&self) -> bool {
        self.active && self.accepted_terms
    }
}
