use uuid::Uuid;

use crate::models::result_value::ResultValue;

/// Identity of the competitor a result belongs to. A category scores either
/// teams or athletes, never both, and a result always references exactly one
/// side; the enum carries that exclusivity instead of a pair of nullable
/// foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParticipantId {
    Team(Uuid),
    Athlete(Uuid),
}

impl ParticipantId {
    pub fn new(id: Uuid, is_team: bool) -> Self {
        if is_team {
            ParticipantId::Team(id)
        } else {
            ParticipantId::Athlete(id)
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            ParticipantId::Team(id) | ParticipantId::Athlete(id) => *id,
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, ParticipantId::Team(_))
    }

    pub fn team_column(&self) -> Option<Uuid> {
        match self {
            ParticipantId::Team(id) => Some(*id),
            ParticipantId::Athlete(_) => None,
        }
    }

    pub fn athlete_column(&self) -> Option<Uuid> {
        match self {
            ParticipantId::Team(_) => None,
            ParticipantId::Athlete(id) => Some(*id),
        }
    }
}

/// One submitted result for a participant in a workout. `position` is
/// `None` until the workout has been ranked at least once; afterwards every
/// record of the workout holds a dense 1-based rank.
#[derive(Debug, Clone)]
pub struct WorkoutResult {
    pub result_id: Uuid,
    pub category_id: Uuid,
    pub workout_id: Uuid,
    pub participant: ParticipantId,
    pub value: Option<ResultValue>,
    pub position: Option<i32>,
    pub finalized: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: Option<chrono::NaiveDateTime>,
}
