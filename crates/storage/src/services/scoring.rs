use std::collections::BTreeMap;

use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::ScoringResult;
use crate::models::{ParticipantId, WorkoutResult};
use crate::repository::category::CategoryRepository;
use crate::repository::participant::ParticipantRepository;
use crate::repository::result_record::WorkoutResultRepository;

/// Sum each participant's assigned positions across the category. Records
/// that have never been ranked carry no position and contribute nothing to
/// the total.
pub(crate) fn total_scores(records: &[WorkoutResult]) -> BTreeMap<ParticipantId, i32> {
    let mut totals = BTreeMap::new();

    for record in records {
        if let Some(position) = record.position {
            *totals.entry(record.participant).or_insert(0) += position;
        }
    }

    totals
}

/// Recompute every participant total in the category from scratch. Totals
/// are zeroed first so a participant whose last record was removed falls
/// back to 0 instead of keeping a stale sum.
pub async fn recalculate_category_scores(
    conn: &mut PgConnection,
    category_id: Uuid,
) -> ScoringResult<BTreeMap<ParticipantId, i32>> {
    let category = CategoryRepository::find_by_id(&mut *conn, category_id)
        .await
        .map_err(|e| e.or_not_found("category"))?;

    let records = WorkoutResultRepository::list_for_category(&mut *conn, category_id).await?;
    let totals = total_scores(&records);

    ParticipantRepository::reset_total_scores(&mut *conn, &category).await?;
    for (participant, total) in &totals {
        ParticipantRepository::set_total_score(&mut *conn, *participant, *total).await?;
    }

    tracing::debug!(%category_id, participants = totals.len(), "category totals recomputed");

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(participant: u128, workout: u128, position: Option<i32>) -> WorkoutResult {
        WorkoutResult {
            result_id: Uuid::from_u128(participant * 1000 + workout),
            category_id: Uuid::from_u128(1),
            workout_id: Uuid::from_u128(workout),
            participant: ParticipantId::Athlete(Uuid::from_u128(participant)),
            value: None,
            position,
            finalized: false,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    fn total_of(totals: &BTreeMap<ParticipantId, i32>, participant: u128) -> Option<i32> {
        totals
            .get(&ParticipantId::Athlete(Uuid::from_u128(participant)))
            .copied()
    }

    #[test]
    fn totals_sum_positions_across_workouts() {
        let records = vec![
            record(1, 10, Some(2)),
            record(1, 11, Some(1)),
            record(1, 12, Some(4)),
            record(2, 10, Some(1)),
            record(2, 11, Some(3)),
        ];

        let totals = total_scores(&records);
        assert_eq!(total_of(&totals, 1), Some(7));
        assert_eq!(total_of(&totals, 2), Some(4));
    }

    #[test]
    fn unranked_records_contribute_nothing() {
        let records = vec![record(1, 10, Some(3)), record(1, 11, None)];

        let totals = total_scores(&records);
        assert_eq!(total_of(&totals, 1), Some(3));
    }

    #[test]
    fn participant_with_only_unranked_records_has_no_total() {
        let records = vec![record(1, 10, None)];

        let totals = total_scores(&records);
        assert_eq!(total_of(&totals, 1), None);
    }

    #[test]
    fn empty_category_yields_empty_totals() {
        assert!(total_scores(&[]).is_empty());
    }

    #[test]
    fn recomputation_is_idempotent() {
        let records = vec![record(1, 10, Some(2)), record(2, 10, Some(1))];

        assert_eq!(total_scores(&records), total_scores(&records));
    }
}
