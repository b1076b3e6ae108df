use sqlx::PgPool;
use storage::{
    dto::scoreboard::{CategoryRankingEntry, CategoryRankingPage, RankingQuery},
    error::ScoringResult,
    services::standings,
};
use uuid::Uuid;

/// Category standings, best total first, cut down to the requested page.
pub async fn category_ranking(
    pool: &PgPool,
    category_id: Uuid,
    query: &RankingQuery,
) -> ScoringResult<CategoryRankingPage> {
    let entries = standings::category_ranking(pool, category_id).await?;

    let total_items = entries.len() as i64;
    let page: Vec<CategoryRankingEntry> = entries
        .into_iter()
        .skip(query.offset())
        .take(query.limit())
        .collect();

    Ok(CategoryRankingPage {
        data: page,
        page: query.page,
        page_size: query.page_size,
        total_items,
    })
}
