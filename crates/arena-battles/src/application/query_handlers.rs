//! Query handlers for the battle coordinator.
//!
//! Queries read stored battles and return serializable view DTOs.

use arena_core::battle::Battle;
use arena_core::error::DomainError;
use arena_core::repository::BattleRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Read-only view of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleView {
    /// The battle identifier.
    pub battle_id: Uuid,
    /// First contestant.
    pub contestant_1_id: Uuid,
    /// Second contestant.
    pub contestant_2_id: Uuid,
    /// The winner, once resolved.
    pub winner_id: Option<Uuid>,
    /// Whether the loser died.
    pub death_occurred: bool,
    /// Injury summary, if any.
    pub injuries: Option<String>,
    /// When the battle was scheduled.
    pub date: DateTime<Utc>,
    /// Whether the battle has an outcome.
    pub resolved: bool,
}

impl From<Battle> for BattleView {
    fn from(battle: Battle) -> Self {
        let resolved = battle.is_resolved();
        Self {
            battle_id: battle.id,
            contestant_1_id: battle.contestant_1_id,
            contestant_2_id: battle.contestant_2_id,
            winner_id: battle.winner_id,
            death_occurred: battle.death_occurred,
            injuries: battle.injuries,
            date: battle.date,
            resolved,
        }
    }
}

/// Retrieves a battle by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no battle has this id.
pub async fn get_battle_by_id(
    battle_id: Uuid,
    battles: &dyn BattleRepository,
) -> Result<BattleView, DomainError> {
    battles
        .find(battle_id)
        .await?
        .map(BattleView::from)
        .ok_or_else(|| DomainError::battle_not_found(battle_id))
}

/// Lists every battle, most recent first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if storage fails.
pub async fn list_battles(battles: &dyn BattleRepository) -> Result<Vec<BattleView>, DomainError> {
    Ok(battles
        .list()
        .await?
        .into_iter()
        .map(BattleView::from)
        .collect())
}

/// Lists the battles a contestant took part in, most recent first. An
/// unknown contestant simply has no battles.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if storage fails.
pub async fn list_battles_for_contestant(
    contestant_id: Uuid,
    battles: &dyn BattleRepository,
) -> Result<Vec<BattleView>, DomainError> {
    Ok(battles
        .list_for_contestant(contestant_id)
        .await?
        .into_iter()
        .map(BattleView::from)
        .collect())
}
