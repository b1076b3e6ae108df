use axum::{
    Router,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    get_participant_results, get_workout_results, remove_result, submit_result,
    submit_result_batch,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route(
            "/categories/:category_id/workouts/:workout_id/results",
            get(get_workout_results).post(submit_result),
        )
        .route(
            "/categories/:category_id/workouts/:workout_id/results/batch",
            post(submit_result_batch),
        )
        .route(
            "/workouts/:workout_id/results/:participant_id",
            delete(remove_result),
        )
        .route("/participants/:participant_id/results", get(get_participant_results))
}
