use std::time::Duration;

use anyhow::Context;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use storage::Database;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::results::handlers::submit_result,
        features::results::handlers::submit_result_batch,
        features::results::handlers::remove_result,
        features::results::handlers::get_workout_results,
        features::results::handlers::get_participant_results,
        features::scoreboard::handlers::get_category_ranking,
    ),
    components(
        schemas(
            storage::dto::results::SubmitResultRequest,
            storage::dto::results::BatchResultItem,
            storage::dto::results::BatchSubmitRequest,
            storage::dto::results::WorkoutResultResponse,
            storage::dto::results::WorkoutResultEntry,
            storage::dto::results::ParticipantResultEntry,
            storage::dto::results::BatchFailureResponse,
            storage::dto::results::BatchSubmitResponse,
            storage::dto::scoreboard::WorkoutPositionEntry,
            storage::dto::scoreboard::CategoryRankingEntry,
            storage::dto::scoreboard::CategoryRankingPage,
            storage::models::Category,
            storage::models::ParticipationMode,
            storage::models::Workout,
            storage::models::ResultType,
            storage::models::RawResultValue,
            storage::models::Team,
            storage::models::Athlete,
        )
    ),
    tags(
        (name = "results", description = "Result submission and workout rankings"),
        (name = "scoreboard", description = "Cumulative category standings"),
    )
)]
struct ApiDoc;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(
        &config.database_url,
        Duration::from_millis(config.lock_wait_ms),
    )
    .await
    .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = features::results::routes::routes()
        .merge(features::scoreboard::routes::routes())
        .with_state(db);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app).await?;

    Ok(())
}
