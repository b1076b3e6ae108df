mod athlete;
mod category;
mod result_record;
mod result_value;
mod team;
mod workout;

pub use athlete::Athlete;
pub use category::{Category, ParticipationMode};
pub use result_record::{ParticipantId, WorkoutResult};
pub use result_value::{RawResultValue, ResultValue, format_duration, parse_duration};
pub use team::Team;
pub use workout::{ResultType, Workout};
