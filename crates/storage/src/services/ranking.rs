use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::{ScoringError, ScoringResult};
use crate::models::{ParticipantId, ResultType, WorkoutResult};
use crate::repository::result_record::WorkoutResultRepository;
use crate::repository::workout::WorkoutRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedResult {
    pub result_id: Uuid,
    pub participant: ParticipantId,
    pub position: i32,
}

/// Order a workout's records by its result type and hand out dense 1-based
/// positions. Equal values (and missing values, which all sort last) are
/// broken by participant id ascending, so reruns over unchanged input
/// always produce the same assignment.
pub(crate) fn ordered_positions(
    records: &[WorkoutResult],
    result_type: ResultType,
) -> Vec<RankedResult> {
    let mut order: Vec<&WorkoutResult> = records.iter().collect();
    order.sort_by(|a, b| {
        result_type
            .compare(a.value.as_ref(), b.value.as_ref())
            .then_with(|| a.participant.uuid().cmp(&b.participant.uuid()))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedResult {
            result_id: record.result_id,
            participant: record.participant,
            position: index as i32 + 1,
        })
        .collect()
}

/// Recompute and persist positions for one workout of a category. Runs
/// inside the caller's transaction; an empty workout is a no-op.
pub async fn rank_workout(
    conn: &mut PgConnection,
    category_id: Uuid,
    workout_id: Uuid,
) -> ScoringResult<Vec<RankedResult>> {
    let workout = WorkoutRepository::find_by_id(&mut *conn, workout_id)
        .await
        .map_err(|e| e.or_not_found("workout"))?;
    if workout.category_id != category_id {
        return Err(ScoringError::NotFound("workout"));
    }

    let records = WorkoutResultRepository::list_for_workout(&mut *conn, workout_id).await?;
    let ranked = ordered_positions(&records, workout.result_type);

    for entry in &ranked {
        let unchanged = records
            .iter()
            .any(|r| r.result_id == entry.result_id && r.position == Some(entry.position));
        if unchanged {
            continue;
        }
        WorkoutResultRepository::update_position(&mut *conn, entry.result_id, entry.position)
            .await?;
    }

    tracing::debug!(%category_id, %workout_id, records = ranked.len(), "workout reranked");

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::ResultValue;

    fn record(n: u128, value: Option<ResultValue>) -> WorkoutResult {
        WorkoutResult {
            result_id: Uuid::from_u128(n),
            category_id: Uuid::from_u128(100),
            workout_id: Uuid::from_u128(200),
            participant: ParticipantId::Athlete(Uuid::from_u128(n)),
            value,
            position: None,
            finalized: false,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    fn positions(ranked: &[RankedResult]) -> Vec<(u128, i32)> {
        ranked
            .iter()
            .map(|r| (r.participant.uuid().as_u128(), r.position))
            .collect()
    }

    #[test]
    fn positions_form_a_dense_permutation() {
        let records = vec![
            record(1, Some(ResultValue::Reps(10))),
            record(2, Some(ResultValue::Reps(30))),
            record(3, Some(ResultValue::Reps(20))),
            record(4, None),
        ];

        let ranked = ordered_positions(&records, ResultType::Reps);
        let mut assigned: Vec<i32> = ranked.iter().map(|r| r.position).collect();
        assigned.sort_unstable();
        assert_eq!(assigned, vec![1, 2, 3, 4]);
    }

    #[test]
    fn time_workout_ranks_fastest_first() {
        let records = vec![
            record(1, Some(ResultValue::TimeSeconds(130))),
            record(2, Some(ResultValue::TimeSeconds(95))),
            record(3, Some(ResultValue::TimeSeconds(200))),
        ];

        let ranked = ordered_positions(&records, ResultType::Time);
        assert_eq!(positions(&ranked), vec![(2, 1), (1, 2), (3, 3)]);
    }

    #[test]
    fn weight_workout_ranks_heaviest_first() {
        let records = vec![
            record(1, Some(ResultValue::Weight(Decimal::new(825, 1)))),
            record(2, Some(ResultValue::Weight(Decimal::new(1025, 1)))),
        ];

        let ranked = ordered_positions(&records, ResultType::Weight);
        assert_eq!(positions(&ranked), vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn ties_break_by_participant_id_ascending() {
        let records = vec![
            record(7, Some(ResultValue::Reps(100))),
            record(3, Some(ResultValue::Reps(100))),
            record(5, Some(ResultValue::Reps(100))),
        ];

        let ranked = ordered_positions(&records, ResultType::Reps);
        assert_eq!(positions(&ranked), vec![(3, 1), (5, 2), (7, 3)]);
    }

    #[test]
    fn missing_values_rank_behind_every_result() {
        let records = vec![
            record(1, None),
            record(2, Some(ResultValue::TimeSeconds(5000))),
        ];

        let ranked = ordered_positions(&records, ResultType::Time);
        assert_eq!(positions(&ranked), vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn reranking_unchanged_input_is_stable() {
        let records = vec![
            record(1, Some(ResultValue::Reps(10))),
            record(2, Some(ResultValue::Reps(30))),
            record(3, Some(ResultValue::Reps(30))),
        ];

        let first = ordered_positions(&records, ResultType::Reps);
        let second = ordered_positions(&records, ResultType::Reps);
        assert_eq!(first, second);
    }
}
