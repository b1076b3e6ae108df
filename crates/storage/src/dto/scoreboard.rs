use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RankingQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    25
}

impl RankingQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err("page_size must be between 1 and 100".to_string());
        }
        Ok(())
    }

    pub fn offset(&self) -> usize {
        ((self.page - 1) * self.page_size) as usize
    }

    pub fn limit(&self) -> usize {
        self.page_size as usize
    }
}

/// A participant's position in one workout of the category.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutPositionEntry {
    pub workout_id: Uuid,
    pub workout_name: String,
    pub position: Option<i32>,
}

/// One standings row. Totals sum workout positions, so lower is better;
/// `completed_workouts` counts the participant's finalized results.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRankingEntry {
    pub participant_id: Uuid,
    pub is_team: bool,
    pub display_name: String,
    pub total_score: i32,
    pub completed_workouts: usize,
    pub positions: Vec<WorkoutPositionEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRankingPage {
    pub data: Vec<CategoryRankingEntry>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
}
