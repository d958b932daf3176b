//! Routes for battles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use arena_battles::application::{command_handlers, query_handlers};
use arena_battles::domain::commands;
use arena_core::battle::BattlePatch;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateBattleRequest {
    /// First combatant.
    pub contestant_1_id: Uuid,
    /// Second combatant.
    pub contestant_2_id: Uuid,
}

/// Request body for PATCH /{id}. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBattleRequest {
    /// Replacement first combatant.
    pub contestant_1_id: Option<Uuid>,
    /// Replacement second combatant.
    pub contestant_2_id: Option<Uuid>,
}

/// Request body for POST /{id}/end.
#[derive(Debug, Deserialize)]
pub struct EndBattleRequest {
    /// The winning combatant.
    pub winner_id: Uuid,
    /// Whether the loser died.
    #[serde(default)]
    pub death_occurred: bool,
    /// Free-form injury summary.
    #[serde(default)]
    pub injuries: Option<String>,
}

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct ListBattlesQuery {
    /// Only battles this contestant fought in.
    pub contestant_id: Option<Uuid>,
}

/// Response body for POST /{id}/fight.
#[derive(Debug, Serialize)]
pub struct FightResponse {
    /// The resolved battle.
    #[serde(flatten)]
    pub battle: query_handlers::BattleView,
    /// Whether the winner was injured.
    pub winner_injured: bool,
    /// Whether the loser was injured (survived).
    pub loser_injured: bool,
}

/// POST /
#[instrument(skip(state, request), fields(
    contestant_1_id = %request.contestant_1_id,
    contestant_2_id = %request.contestant_2_id,
))]
async fn create_battle(
    State(state): State<AppState>,
    Json(request): Json<CreateBattleRequest>,
) -> Result<(StatusCode, Json<query_handlers::BattleView>), ApiError> {
    let command = commands::CreateBattle {
        correlation_id: Uuid::new_v4(),
        battle_id: Uuid::new_v4(),
        contestant_1_id: request.contestant_1_id,
        contestant_2_id: request.contestant_2_id,
    };

    info!(correlation_id = %command.correlation_id, "handling create_battle command");

    let battle = command_handlers::handle_create_battle(
        &command,
        state.clock.as_ref(),
        &*state.contestants,
        &*state.battles,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(battle.into())))
}

/// GET /
#[instrument(skip(state))]
async fn list_battles(
    State(state): State<AppState>,
    Query(query): Query<ListBattlesQuery>,
) -> Result<Json<Vec<query_handlers::BattleView>>, ApiError> {
    let views = match query.contestant_id {
        Some(contestant_id) => {
            query_handlers::list_battles_for_contestant(contestant_id, &*state.battles).await?
        }
        None => query_handlers::list_battles(&*state.battles).await?,
    };
    Ok(Json(views))
}

/// GET /{id}
#[instrument(skip_all, fields(battle_id = %battle_id))]
async fn get_battle(
    State(state): State<AppState>,
    Path(battle_id): Path<Uuid>,
) -> Result<Json<query_handlers::BattleView>, ApiError> {
    let view = query_handlers::get_battle_by_id(battle_id, &*state.battles).await?;
    Ok(Json(view))
}

/// PATCH /{id}
#[instrument(skip_all, fields(battle_id = %battle_id))]
async fn update_battle(
    State(state): State<AppState>,
    Path(battle_id): Path<Uuid>,
    Json(request): Json<UpdateBattleRequest>,
) -> Result<Json<query_handlers::BattleView>, ApiError> {
    let command = commands::UpdateBattle {
        correlation_id: Uuid::new_v4(),
        battle_id,
        patch: BattlePatch {
            contestant_1_id: request.contestant_1_id,
            contestant_2_id: request.contestant_2_id,
        },
    };

    info!(correlation_id = %command.correlation_id, "handling update_battle command");

    let battle =
        command_handlers::handle_update_battle(&command, &*state.contestants, &*state.battles)
            .await?;

    Ok(Json(battle.into()))
}

/// DELETE /{id}
#[instrument(skip_all, fields(battle_id = %battle_id))]
async fn delete_battle(
    State(state): State<AppState>,
    Path(battle_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteBattle {
        correlation_id: Uuid::new_v4(),
        battle_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_battle command");

    command_handlers::handle_delete_battle(&command, &*state.battles).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /{id}/end
#[instrument(skip_all, fields(battle_id = %battle_id, winner_id = %request.winner_id))]
async fn end_battle(
    State(state): State<AppState>,
    Path(battle_id): Path<Uuid>,
    Json(request): Json<EndBattleRequest>,
) -> Result<Json<query_handlers::BattleView>, ApiError> {
    let command = commands::EndBattle {
        correlation_id: Uuid::new_v4(),
        battle_id,
        winner_id: request.winner_id,
        death_occurred: request.death_occurred,
        injuries: request.injuries,
    };

    info!(correlation_id = %command.correlation_id, "handling end_battle command");

    let battle =
        command_handlers::handle_end_battle(&command, &*state.contestants, &*state.battles)
            .await?;

    Ok(Json(battle.into()))
}

/// POST /{id}/fight
#[instrument(skip_all, fields(battle_id = %battle_id))]
async fn fight_battle(
    State(state): State<AppState>,
    Path(battle_id): Path<Uuid>,
) -> Result<Json<FightResponse>, ApiError> {
    let command = commands::FightBattle {
        correlation_id: Uuid::new_v4(),
        battle_id,
    };

    info!(correlation_id = %command.correlation_id, "handling fight_battle command");

    let report = command_handlers::handle_fight_battle(
        &command,
        &state.rng,
        &*state.contestants,
        &*state.battles,
    )
    .await?;

    Ok(Json(FightResponse {
        battle: report.battle.into(),
        winner_injured: report.outcome.winner_injured,
        loser_injured: report.outcome.loser_injured,
    }))
}

/// Returns the router for battles.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_battle).get(list_battles))
        .route(
            "/{id}",
            get(get_battle).patch(update_battle).delete(delete_battle),
        )
        .route("/{id}/end", post(end_battle))
        .route("/{id}/fight", post(fight_battle))
}
