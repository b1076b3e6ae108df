use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scoreboard::{CategoryRankingPage, RankingQuery},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/categories/{category_id}/ranking",
    params(
        ("category_id" = Uuid, Path, description = "Category id"),
        RankingQuery
    ),
    responses(
        (status = 200, description = "Standings ordered by total score, lower totals first", body = CategoryRankingPage),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Category not found")
    ),
    tag = "scoreboard"
)]
pub async fn get_category_ranking(
    State(db): State<Database>,
    Path(category_id): Path<Uuid>,
    Query(query): Query<RankingQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let page = services::category_ranking(db.pool(), category_id, &query).await?;

    Ok(Json(page).into_response())
}
