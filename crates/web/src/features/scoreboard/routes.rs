use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_category_ranking;

pub fn routes() -> Router<Database> {
    Router::new().route("/categories/:category_id/ranking", get(get_category_ranking))
}
