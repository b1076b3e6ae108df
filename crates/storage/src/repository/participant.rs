use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Athlete, Category, ParticipantId, Team};

/// Mode-independent projection of a competitor, used by the standings
/// assembly. `total_score` is the aggregator-owned running total.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub total_score: i32,
}

pub struct ParticipantRepository;

impl ParticipantRepository {
    pub async fn find_team(ex: impl PgExecutor<'_>, team_id: Uuid) -> Result<Team> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, category_id, name, active, total_score, created_at
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(ex)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_athlete(ex: impl PgExecutor<'_>, athlete_id: Uuid) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(
            r#"
            SELECT athlete_id, category_id, first_name, last_name,
                   active, accepted_terms, total_score, created_at
            FROM athletes
            WHERE athlete_id = $1
            "#,
        )
        .bind(athlete_id)
        .fetch_optional(ex)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// All competitors registered in the category, as the mode dictates.
    pub async fn list_for_category(
        ex: impl PgExecutor<'_>,
        category: &Category,
    ) -> Result<Vec<Participant>> {
        if category.participation_mode.expects_team() {
            let teams = sqlx::query_as::<_, Team>(
                r#"
                SELECT team_id, category_id, name, active, total_score, created_at
                FROM teams
                WHERE category_id = $1
                ORDER BY name, team_id
                "#,
            )
            .bind(category.category_id)
            .fetch_all(ex)
            .await?;

            Ok(teams
                .into_iter()
                .map(|team| Participant {
                    id: ParticipantId::Team(team.team_id),
                    display_name: team.name,
                    total_score: team.total_score,
                })
                .collect())
        } else {
            let athletes = sqlx::query_as::<_, Athlete>(
                r#"
                SELECT athlete_id, category_id, first_name, last_name,
                       active, accepted_terms, total_score, created_at
                FROM athletes
                WHERE category_id = $1
                ORDER BY last_name, first_name, athlete_id
                "#,
            )
            .bind(category.category_id)
            .fetch_all(ex)
            .await?;

            Ok(athletes
                .into_iter()
                .map(|athlete| Participant {
                    id: ParticipantId::Athlete(athlete.athlete_id),
                    display_name: athlete.display_name(),
                    total_score: athlete.total_score,
                })
                .collect())
        }
    }

    /// Zero every total in the category before the aggregator writes fresh
    /// sums, so competitors whose last record was removed drop back to 0.
    pub async fn reset_total_scores(ex: impl PgExecutor<'_>, category: &Category) -> Result<()> {
        let sql = if category.participation_mode.expects_team() {
            "UPDATE teams SET total_score = 0 WHERE category_id = $1"
        } else {
            "UPDATE athletes SET total_score = 0 WHERE category_id = $1"
        };

        sqlx::query(sql).bind(category.category_id).execute(ex).await?;

        Ok(())
    }

    pub async fn set_total_score(
        ex: impl PgExecutor<'_>,
        participant: ParticipantId,
        total_score: i32,
    ) -> Result<()> {
        let sql = match participant {
            ParticipantId::Team(_) => "UPDATE teams SET total_score = $2 WHERE team_id = $1",
            ParticipantId::Athlete(_) => {
                "UPDATE athletes SET total_score = $2 WHERE athlete_id = $1"
            }
        };

        let result = sqlx::query(sql)
            .bind(participant.uuid())
            .bind(total_score)
            .execute(ex)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
