//! Arena battle engine API server entry point.

use std::sync::{Arc, Mutex};

use arena_api::config::ServerConfig;
use arena_api::error::AppError;
use arena_api::state::AppState;
use arena_core::clock::SystemClock;
use arena_core::rng::{DeterministicRng, StdDeterministicRng};
use arena_store::pg_battle_repository::PgBattleRepository;
use arena_store::pg_contestant_directory::PgContestantDirectory;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // A missing .env file is fine; the process environment still applies.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "loaded environment file");
    }
    tracing::info!("Starting arena API server");

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "combat RNG seeded from configuration");
            Arc::new(Mutex::new(StdDeterministicRng::seeded(seed)))
        }
        None => Arc::new(Mutex::new(StdDeterministicRng::from_entropy())),
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        rng,
        Arc::new(PgContestantDirectory::new(pool.clone())),
        Arc::new(PgBattleRepository::new(pool)),
    );

    let app = arena_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
