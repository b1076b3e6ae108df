use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub active: bool,
    pub total_score: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl Team {
    pub fn is_eligible(&self) -> bool {
        self.active
    }
}
