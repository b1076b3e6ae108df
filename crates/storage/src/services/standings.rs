use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::results::{ParticipantResultEntry, WorkoutResultEntry};
use crate::dto::scoreboard::{CategoryRankingEntry, WorkoutPositionEntry};
use crate::error::{ScoringError, ScoringResult};
use crate::models::{ParticipantId, ResultType, ResultValue, Workout, WorkoutResult};
use crate::repository::category::CategoryRepository;
use crate::repository::participant::{Participant, ParticipantRepository};
use crate::repository::result_record::WorkoutResultRepository;
use crate::repository::workout::WorkoutRepository;

/// A workout's results in rank order, with display names attached.
pub async fn workout_results(
    pool: &PgPool,
    category_id: Uuid,
    workout_id: Uuid,
) -> ScoringResult<Vec<WorkoutResultEntry>> {
    let category = CategoryRepository::find_by_id(pool, category_id)
        .await
        .map_err(|e| e.or_not_found("category"))?;
    let workout = WorkoutRepository::find_by_id(pool, workout_id)
        .await
        .map_err(|e| e.or_not_found("workout"))?;
    if workout.category_id != category_id {
        return Err(ScoringError::NotFound("workout"));
    }

    let records = WorkoutResultRepository::list_for_workout(pool, workout_id).await?;
    let participants = ParticipantRepository::list_for_category(pool, &category).await?;

    Ok(build_workout_entries(
        &records,
        &participants,
        workout.result_type,
    ))
}

/// Everything one participant has on the board, across workouts.
pub async fn participant_results(
    pool: &PgPool,
    participant_id: Uuid,
) -> ScoringResult<Vec<ParticipantResultEntry>> {
    let rows = WorkoutResultRepository::list_for_participant(pool, participant_id).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let value =
                ResultValue::from_columns(row.value_reps, row.value_weight, row.value_seconds);
            ParticipantResultEntry {
                category_id: row.category_id,
                workout_id: row.workout_id,
                workout_name: row.workout_name,
                value: value.as_ref().map(|v| row.result_type.format(v)),
                position: (row.position > 0).then_some(row.position),
                finalized: row.finalized,
            }
        })
        .collect())
}

/// Full category standings, best total first. The caller paginates.
pub async fn category_ranking(
    pool: &PgPool,
    category_id: Uuid,
) -> ScoringResult<Vec<CategoryRankingEntry>> {
    let category = CategoryRepository::find_by_id(pool, category_id)
        .await
        .map_err(|e| e.or_not_found("category"))?;

    let workouts = WorkoutRepository::list_for_category(pool, category_id).await?;
    let participants = ParticipantRepository::list_for_category(pool, &category).await?;
    let records = WorkoutResultRepository::list_for_category(pool, category_id).await?;

    Ok(build_category_standings(&participants, &workouts, &records))
}

pub(crate) fn build_workout_entries(
    records: &[WorkoutResult],
    participants: &[Participant],
    result_type: ResultType,
) -> Vec<WorkoutResultEntry> {
    let names: HashMap<ParticipantId, &str> = participants
        .iter()
        .map(|p| (p.id, p.display_name.as_str()))
        .collect();

    records
        .iter()
        .map(|record| WorkoutResultEntry {
            participant_id: record.participant.uuid(),
            is_team: record.participant.is_team(),
            display_name: names
                .get(&record.participant)
                .map(|name| (*name).to_string())
                .unwrap_or_default(),
            position: record.position,
            value: record.value.as_ref().map(|v| result_type.format(v)),
            finalized: record.finalized,
        })
        .collect()
}

/// Assemble standings rows: totals come from the participant records (the
/// aggregator keeps them current), per-workout positions from the result
/// set. Ordered by total ascending, participant id as the deterministic
/// tie-break; participants without any result sit at total 0.
pub(crate) fn build_category_standings(
    participants: &[Participant],
    workouts: &[Workout],
    records: &[WorkoutResult],
) -> Vec<CategoryRankingEntry> {
    let mut by_participant: HashMap<ParticipantId, HashMap<Uuid, &WorkoutResult>> = HashMap::new();
    for record in records {
        by_participant
            .entry(record.participant)
            .or_default()
            .insert(record.workout_id, record);
    }

    let mut entries: Vec<CategoryRankingEntry> = participants
        .iter()
        .map(|participant| {
            let own = by_participant.get(&participant.id);

            let positions = workouts
                .iter()
                .map(|workout| WorkoutPositionEntry {
                    workout_id: workout.workout_id,
                    workout_name: workout.name.clone(),
                    position: own
                        .and_then(|records| records.get(&workout.workout_id))
                        .and_then(|record| record.position),
                })
                .collect();

            let completed_workouts = own
                .map(|records| records.values().filter(|r| r.finalized).count())
                .unwrap_or(0);

            CategoryRankingEntry {
                participant_id: participant.id.uuid(),
                is_team: participant.id.is_team(),
                display_name: participant.display_name.clone(),
                total_score: participant.total_score,
                completed_workouts,
                positions,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.total_score
            .cmp(&b.total_score)
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(n: u128, total: i32) -> Participant {
        Participant {
            id: ParticipantId::Athlete(Uuid::from_u128(n)),
            display_name: format!("Athlete {n}"),
            total_score: total,
        }
    }

    fn workout(n: u128) -> Workout {
        Workout {
            workout_id: Uuid::from_u128(n),
            category_id: Uuid::from_u128(1),
            name: format!("Workout {n}"),
            result_type: ResultType::Reps,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn record(
        participant_id: u128,
        workout_id: u128,
        position: Option<i32>,
        finalized: bool,
    ) -> WorkoutResult {
        WorkoutResult {
            result_id: Uuid::from_u128(participant_id * 1000 + workout_id),
            category_id: Uuid::from_u128(1),
            workout_id: Uuid::from_u128(workout_id),
            participant: ParticipantId::Athlete(Uuid::from_u128(participant_id)),
            value: Some(ResultValue::Reps(10)),
            position,
            finalized,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn standings_order_by_total_ascending() {
        let participants = vec![participant(1, 7), participant(2, 3), participant(3, 5)];
        let standings = build_category_standings(&participants, &[workout(10)], &[]);

        let order: Vec<i32> = standings.iter().map(|e| e.total_score).collect();
        assert_eq!(order, vec![3, 5, 7]);
    }

    #[test]
    fn equal_totals_order_by_participant_id() {
        let participants = vec![participant(9, 4), participant(2, 4)];
        let standings = build_category_standings(&participants, &[], &[]);

        assert_eq!(standings[0].participant_id, Uuid::from_u128(2));
        assert_eq!(standings[1].participant_id, Uuid::from_u128(9));
    }

    #[test]
    fn positions_line_up_with_the_category_workouts() {
        let participants = vec![participant(1, 3)];
        let workouts = vec![workout(10), workout(11)];
        let records = vec![record(1, 10, Some(3), true)];

        let standings = build_category_standings(&participants, &workouts, &records);
        let positions: Vec<Option<i32>> =
            standings[0].positions.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![Some(3), None]);
    }

    #[test]
    fn completed_workouts_count_finalized_records_only() {
        let participants = vec![participant(1, 5)];
        let workouts = vec![workout(10), workout(11), workout(12)];
        let records = vec![
            record(1, 10, Some(2), true),
            record(1, 11, Some(3), false),
            record(1, 12, None, true),
        ];

        let standings = build_category_standings(&participants, &workouts, &records);
        assert_eq!(standings[0].completed_workouts, 2);
    }

    #[test]
    fn workout_entries_carry_names_and_formatted_values() {
        let participants = vec![participant(1, 0)];
        let records = vec![record(1, 10, Some(1), false)];

        let entries = build_workout_entries(&records, &participants, ResultType::Reps);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name, "Athlete 1");
        assert_eq!(entries[0].value.as_deref(), Some("10"));
        assert_eq!(entries[0].position, Some(1));
    }
}
