//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use arena_core::clock::Clock;
use arena_core::contestant::Contestant;
use arena_core::rng::DeterministicRng;
use arena_store::pg_battle_repository::PgBattleRepository;
use arena_store::pg_contestant_directory::PgContestantDirectory;
use arena_test_support::{FixedClock, SequenceRng};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use arena_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over the real `PostgreSQL` repositories with a
/// deterministic clock. The RNG panics if drawn from.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_rng(pool, SequenceRng::new(vec![]))
}

/// Build the full app router with a custom `SequenceRng` for fights.
pub fn build_test_app_with_rng(pool: PgPool, rng: SequenceRng) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let app_state = AppState::new(
        fixed_clock(),
        rng,
        Arc::new(PgContestantDirectory::new(pool.clone())),
        Arc::new(PgBattleRepository::new(pool)),
    );
    arena_api::app(app_state)
}

/// Registers a living contestant directly in the database.
pub async fn seed_contestant(pool: &PgPool, name: &str, strength: u32, agility: u32) -> Contestant {
    let contestant = Contestant::new(Uuid::new_v4(), name, strength, agility);
    PgContestantDirectory::new(pool.clone())
        .insert(&contestant)
        .await
        .unwrap();
    contestant
}

/// Send a request with a JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a DELETE request and return only the status.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}

/// Reads a contestant's `(status, wins, losses)` straight from the table.
pub async fn contestant_record(pool: &PgPool, id: Uuid) -> (String, i32, i32) {
    sqlx::query_as("SELECT status, wins, losses FROM contestants WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}
