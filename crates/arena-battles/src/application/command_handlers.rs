//! Command handlers for the battle coordinator.
//!
//! Each handler validates preconditions against the current stored state,
//! then performs its writes through the repository ports. Outcome writes
//! always go through `BattleRepository::commit_resolution` so the battle and
//! both contestants change together or not at all.

use std::sync::Mutex;

use arena_core::battle::Battle;
use arena_core::clock::Clock;
use arena_core::command::Command;
use arena_core::contestant::Contestant;
use arena_core::error::DomainError;
use arena_core::repository::{BattleRepository, ContestantDirectory};
use arena_core::rng::DeterministicRng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::combat::{self, Outcome};
use crate::domain::commands::{CreateBattle, DeleteBattle, EndBattle, FightBattle, UpdateBattle};

/// A battle decided by the combat resolver, with the full computed outcome.
#[derive(Debug, Clone)]
pub struct FightReport {
    /// The battle as persisted.
    pub battle: Battle,
    /// Everything the resolver decided, including flags not stored on the
    /// battle.
    pub outcome: Outcome,
}

async fn ensure_exists(contestants: &dyn ContestantDirectory, id: Uuid) -> Result<(), DomainError> {
    if contestants.exists(id).await? {
        Ok(())
    } else {
        Err(DomainError::contestant_not_found(id))
    }
}

/// Checks both contestants exist, concurrently.
async fn ensure_pair_exists(
    contestants: &dyn ContestantDirectory,
    contestant_1_id: Uuid,
    contestant_2_id: Uuid,
) -> Result<(), DomainError> {
    tokio::try_join!(
        ensure_exists(contestants, contestant_1_id),
        ensure_exists(contestants, contestant_2_id),
    )?;
    Ok(())
}

async fn load_battle(battles: &dyn BattleRepository, id: Uuid) -> Result<Battle, DomainError> {
    battles
        .find(id)
        .await?
        .ok_or_else(|| DomainError::battle_not_found(id))
}

fn ensure_unresolved(battle: &Battle) -> Result<(), DomainError> {
    if battle.is_resolved() {
        warn!(battle_id = %battle.id, "rejecting re-resolution of terminal battle");
        return Err(DomainError::InvalidState(format!(
            "battle {} is already resolved",
            battle.id
        )));
    }
    Ok(())
}

/// Fetches both contestant snapshots concurrently and checks they can still
/// fight.
async fn load_living_pair(
    contestants: &dyn ContestantDirectory,
    first: Uuid,
    second: Uuid,
) -> Result<(Contestant, Contestant), DomainError> {
    let (first, second) = tokio::try_join!(contestants.get(first), contestants.get(second))?;
    for contestant in [&first, &second] {
        if !contestant.is_alive() {
            warn!(contestant_id = %contestant.id, "contestant is dead");
            return Err(DomainError::InvalidState(format!(
                "contestant {} is dead",
                contestant.id
            )));
        }
    }
    Ok((first, second))
}

/// Handles the `CreateBattle` command: validates the pair and persists an
/// unresolved battle. No contestant is touched.
///
/// # Errors
///
/// Returns `DomainError::InvalidState` for identical contestants,
/// `DomainError::NotFound` if either contestant is missing, and
/// `DomainError::Infrastructure` if persistence fails.
#[instrument(skip_all, fields(
    battle_id = %command.battle_id, correlation_id = %command.correlation_id
))]
pub async fn handle_create_battle(
    command: &CreateBattle,
    clock: &dyn Clock,
    contestants: &dyn ContestantDirectory,
    battles: &dyn BattleRepository,
) -> Result<Battle, DomainError> {
    let battle = Battle::new(
        command.battle_id,
        command.contestant_1_id,
        command.contestant_2_id,
        clock.now(),
    )?;
    ensure_pair_exists(contestants, battle.contestant_1_id, battle.contestant_2_id).await?;

    battles.insert(&battle).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        battle_id = %battle.id,
        "battle scheduled"
    );
    Ok(battle)
}

/// Handles the `EndBattle` command: fixes a caller-supplied outcome and
/// applies the contestant transition atomically.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the battle or a combatant is missing,
/// `DomainError::InvalidState` if the battle is already resolved, the winner
/// does not fight in it or a combatant is dead, and
/// `DomainError::Infrastructure` if the commit fails (nothing is applied).
#[instrument(skip_all, fields(
    battle_id = %command.battle_id, correlation_id = %command.correlation_id
))]
pub async fn handle_end_battle(
    command: &EndBattle,
    contestants: &dyn ContestantDirectory,
    battles: &dyn BattleRepository,
) -> Result<Battle, DomainError> {
    let mut battle = load_battle(battles, command.battle_id).await?;
    ensure_unresolved(&battle)?;
    let loser_id = battle.loser_for(command.winner_id)?;
    load_living_pair(contestants, command.winner_id, loser_id).await?;

    let transition = battle.resolve(
        command.winner_id,
        command.death_occurred,
        command.injuries.clone(),
    )?;
    battles.commit_resolution(&battle, &transition).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        battle_id = %battle.id,
        winner_id = %transition.winner_id,
        loser_id = %transition.loser_id,
        death_occurred = battle.death_occurred,
        "battle ended"
    );
    Ok(battle)
}

/// Handles the `FightBattle` command: runs the combat resolver on the two
/// combatants and commits the outcome like `EndBattle`.
///
/// The RNG `Mutex` is locked only around the synchronous resolver call, never
/// across an await point.
///
/// # Errors
///
/// Same as [`handle_end_battle`], plus `DomainError::Infrastructure` if the
/// RNG mutex is poisoned.
#[instrument(skip_all, fields(
    battle_id = %command.battle_id, correlation_id = %command.correlation_id
))]
pub async fn handle_fight_battle(
    command: &FightBattle,
    rng: &Mutex<dyn DeterministicRng + Send>,
    contestants: &dyn ContestantDirectory,
    battles: &dyn BattleRepository,
) -> Result<FightReport, DomainError> {
    let mut battle = load_battle(battles, command.battle_id).await?;
    ensure_unresolved(&battle)?;
    let (first, second) =
        load_living_pair(contestants, battle.contestant_1_id, battle.contestant_2_id).await?;

    let outcome = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        combat::resolve(&first, &second, &mut *rng_guard)
    };

    let transition = battle.resolve(
        outcome.winner_id,
        outcome.death_occurred,
        Some(outcome.injuries.clone()),
    )?;
    battles.commit_resolution(&battle, &transition).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        battle_id = %battle.id,
        winner_id = %outcome.winner_id,
        death_occurred = outcome.death_occurred,
        "battle fought"
    );
    Ok(FightReport { battle, outcome })
}

/// Handles the `UpdateBattle` command: re-pairs an unresolved battle.
///
/// A patch that changes nothing succeeds without writing, even on a
/// resolved battle.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the battle or a new contestant is
/// missing and `DomainError::InvalidState` if the battle is resolved or the
/// new pair is not distinct.
#[instrument(skip_all, fields(
    battle_id = %command.battle_id, correlation_id = %command.correlation_id
))]
pub async fn handle_update_battle(
    command: &UpdateBattle,
    contestants: &dyn ContestantDirectory,
    battles: &dyn BattleRepository,
) -> Result<Battle, DomainError> {
    let mut battle = load_battle(battles, command.battle_id).await?;
    if !battle.apply_patch(&command.patch)? {
        return Ok(battle);
    }
    ensure_pair_exists(contestants, battle.contestant_1_id, battle.contestant_2_id).await?;

    battles.update_pairing(&battle).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        battle_id = %battle.id,
        "battle re-paired"
    );
    Ok(battle)
}

/// Handles the `DeleteBattle` command. Contestant records already updated by
/// the battle stay as they are.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the battle does not exist.
#[instrument(skip_all, fields(
    battle_id = %command.battle_id, correlation_id = %command.correlation_id
))]
pub async fn handle_delete_battle(
    command: &DeleteBattle,
    battles: &dyn BattleRepository,
) -> Result<(), DomainError> {
    if !battles.delete(command.battle_id).await? {
        return Err(DomainError::battle_not_found(command.battle_id));
    }

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        battle_id = %command.battle_id,
        "battle deleted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use arena_core::battle::{Battle, BattlePatch};
    use arena_core::contestant::{Contestant, ContestantStatus};
    use arena_core::error::DomainError;
    use arena_core::rng::DeterministicRng;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_create_battle, handle_delete_battle, handle_end_battle, handle_fight_battle,
        handle_update_battle,
    };
    use crate::domain::commands::{
        CreateBattle, DeleteBattle, EndBattle, FightBattle, UpdateBattle,
    };
    use arena_test_support::{FailingBattleRepository, FixedClock, InMemoryArena, SequenceRng};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    /// Arena with A (10, 0) and B (0, 0) plus a pending battle between them.
    fn arena_with_pending_battle() -> (InMemoryArena, Contestant, Contestant, Battle) {
        let a = Contestant::new(Uuid::new_v4(), "Aurelio", 10, 0);
        let b = Contestant::new(Uuid::new_v4(), "Bruno", 0, 0);
        let arena = InMemoryArena::with_contestants([a.clone(), b.clone()]);
        let battle = Battle::new(Uuid::new_v4(), a.id, b.id, fixed_clock().0).unwrap();
        arena.put_battle(battle.clone());
        (arena, a, b, battle)
    }

    fn end_command(battle_id: Uuid, winner_id: Uuid, death_occurred: bool) -> EndBattle {
        EndBattle {
            correlation_id: Uuid::new_v4(),
            battle_id,
            winner_id,
            death_occurred,
            injuries: None,
        }
    }

    // --- create ---

    #[tokio::test]
    async fn test_create_battle_persists_unresolved_battle() {
        let a = Contestant::new(Uuid::new_v4(), "A", 3, 4);
        let b = Contestant::new(Uuid::new_v4(), "B", 5, 1);
        let arena = InMemoryArena::with_contestants([a.clone(), b.clone()]);
        let command = CreateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: Uuid::new_v4(),
            contestant_1_id: a.id,
            contestant_2_id: b.id,
        };

        let battle = handle_create_battle(&command, &fixed_clock(), &arena, &arena)
            .await
            .unwrap();

        assert_eq!(battle.id, command.battle_id);
        assert!(!battle.is_resolved());
        assert_eq!(battle.date, fixed_clock().0);
        assert_eq!(arena.battle(battle.id).unwrap(), battle);
        assert_eq!(arena.contestant(a.id).unwrap(), a);
        assert_eq!(arena.contestant(b.id).unwrap(), b);
    }

    #[tokio::test]
    async fn test_create_battle_with_missing_contestant_stores_nothing() {
        let a = Contestant::new(Uuid::new_v4(), "A", 3, 4);
        let arena = InMemoryArena::with_contestants([a.clone()]);
        let missing = Uuid::new_v4();
        let command = CreateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: Uuid::new_v4(),
            contestant_1_id: a.id,
            contestant_2_id: missing,
        };

        let result = handle_create_battle(&command, &fixed_clock(), &arena, &arena).await;

        match result.unwrap_err() {
            DomainError::NotFound { entity, id } => {
                assert_eq!(entity, "contestant");
                assert_eq!(id, missing);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(arena.battle_count(), 0);
    }

    #[tokio::test]
    async fn test_create_battle_with_identical_contestants_is_invalid() {
        let a = Contestant::new(Uuid::new_v4(), "A", 3, 4);
        let arena = InMemoryArena::with_contestants([a.clone()]);
        let command = CreateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: Uuid::new_v4(),
            contestant_1_id: a.id,
            contestant_2_id: a.id,
        };

        let result = handle_create_battle(&command, &fixed_clock(), &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert_eq!(arena.battle_count(), 0);
    }

    #[tokio::test]
    async fn test_create_battle_surfaces_storage_failure() {
        let a = Contestant::new(Uuid::new_v4(), "A", 3, 4);
        let b = Contestant::new(Uuid::new_v4(), "B", 5, 1);
        let arena = InMemoryArena::with_contestants([a.clone(), b.clone()]);
        let command = CreateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: Uuid::new_v4(),
            contestant_1_id: a.id,
            contestant_2_id: b.id,
        };

        let result =
            handle_create_battle(&command, &fixed_clock(), &arena, &FailingBattleRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    // --- end ---

    #[tokio::test]
    async fn test_end_battle_with_death_kills_loser_without_loss() {
        let (arena, a, b, battle) = arena_with_pending_battle();

        let ended = handle_end_battle(&end_command(battle.id, a.id, true), &arena, &arena)
            .await
            .unwrap();

        assert_eq!(ended.winner_id, Some(a.id));
        assert!(ended.death_occurred);
        let a_after = arena.contestant(a.id).unwrap();
        let b_after = arena.contestant(b.id).unwrap();
        assert_eq!(a_after.wins, 1);
        assert_eq!(b_after.status, ContestantStatus::Dead);
        assert_eq!(b_after.losses, 0);
    }

    #[tokio::test]
    async fn test_end_battle_without_death_records_loss() {
        let (arena, a, b, battle) = arena_with_pending_battle();

        handle_end_battle(&end_command(battle.id, a.id, false), &arena, &arena)
            .await
            .unwrap();

        let a_after = arena.contestant(a.id).unwrap();
        let b_after = arena.contestant(b.id).unwrap();
        assert_eq!(a_after.wins, 1);
        assert_eq!(b_after.losses, 1);
        assert_eq!(b_after.status, ContestantStatus::Alive);
    }

    #[tokio::test]
    async fn test_end_battle_twice_is_rejected_without_double_counting() {
        let (arena, a, b, battle) = arena_with_pending_battle();
        let command = end_command(battle.id, a.id, false);

        handle_end_battle(&command, &arena, &arena).await.unwrap();
        let second = handle_end_battle(&command, &arena, &arena).await;

        assert!(matches!(second, Err(DomainError::InvalidState(_))));
        assert_eq!(arena.contestant(a.id).unwrap().wins, 1);
        assert_eq!(arena.contestant(b.id).unwrap().losses, 1);
    }

    #[tokio::test]
    async fn test_end_battle_with_foreign_winner_is_invalid() {
        let (arena, a, b, battle) = arena_with_pending_battle();

        let result =
            handle_end_battle(&end_command(battle.id, Uuid::new_v4(), false), &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert!(!arena.battle(battle.id).unwrap().is_resolved());
        assert_eq!(arena.contestant(a.id).unwrap(), a);
        assert_eq!(arena.contestant(b.id).unwrap(), b);
    }

    #[tokio::test]
    async fn test_end_missing_battle_is_not_found() {
        let (arena, a, _, _) = arena_with_pending_battle();

        let result =
            handle_end_battle(&end_command(Uuid::new_v4(), a.id, false), &arena, &arena).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: "battle",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_end_battle_against_dead_contestant_is_invalid() {
        let (arena, a, mut b, battle) = arena_with_pending_battle();
        b.status = ContestantStatus::Dead;
        arena.put_contestant(b.clone());

        let result = handle_end_battle(&end_command(battle.id, a.id, false), &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert_eq!(arena.contestant(a.id).unwrap().wins, 0);
        assert_eq!(arena.contestant(b.id).unwrap().losses, 0);
    }

    #[tokio::test]
    async fn test_end_battle_keeps_supplied_injuries_and_drops_empty_ones() {
        let (arena, a, _, battle) = arena_with_pending_battle();
        let mut command = end_command(battle.id, a.id, false);
        command.injuries = Some("Perdedor (Bruno) herido".to_owned());

        let ended = handle_end_battle(&command, &arena, &arena).await.unwrap();
        assert_eq!(ended.injuries.as_deref(), Some("Perdedor (Bruno) herido"));

        let (arena, a, _, battle) = arena_with_pending_battle();
        let mut command = end_command(battle.id, a.id, false);
        command.injuries = Some(String::new());

        let ended = handle_end_battle(&command, &arena, &arena).await.unwrap();
        assert!(ended.injuries.is_none());
    }

    #[tokio::test]
    async fn test_end_battle_failed_commit_leaves_everything_unchanged() {
        let (arena, a, b, battle) = arena_with_pending_battle();
        arena.fail_contestant_writes(true);
        let command = end_command(battle.id, a.id, true);

        let result = handle_end_battle(&command, &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(!arena.battle(battle.id).unwrap().is_resolved());
        assert_eq!(arena.contestant(a.id).unwrap(), a);
        assert_eq!(arena.contestant(b.id).unwrap(), b);

        // Safe to retry from scratch once storage recovers.
        arena.fail_contestant_writes(false);
        handle_end_battle(&command, &arena, &arena).await.unwrap();
        assert_eq!(arena.contestant(a.id).unwrap().wins, 1);
        assert_eq!(
            arena.contestant(b.id).unwrap().status,
            ContestantStatus::Dead
        );
    }

    // --- fight ---

    #[tokio::test]
    async fn test_fight_zero_power_opponent_always_loses() {
        let (arena, a, b, battle) = arena_with_pending_battle();
        // winner roll, death (0.2 < 0.5), winner injury (0.7 >= 0.6)
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![0.99, 0.2, 0.7]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;
        let command = FightBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
        };

        let report = handle_fight_battle(&command, rng_ref, &arena, &arena)
            .await
            .unwrap();

        assert_eq!(report.outcome.winner_id, a.id);
        assert_eq!(report.battle.winner_id, Some(a.id));
        assert!(report.battle.death_occurred);
        assert_eq!(
            report.battle.injuries.as_deref(),
            Some("Perdedor (Bruno) muerto")
        );
        assert_eq!(arena.battle(battle.id).unwrap(), report.battle);
        assert_eq!(arena.contestant(a.id).unwrap().wins, 1);
        assert_eq!(
            arena.contestant(b.id).unwrap().status,
            ContestantStatus::Dead
        );
    }

    #[tokio::test]
    async fn test_fight_resolved_battle_is_rejected_before_drawing() {
        let (arena, a, _, battle) = arena_with_pending_battle();
        handle_end_battle(&end_command(battle.id, a.id, false), &arena, &arena)
            .await
            .unwrap();
        // An empty sequence panics on any draw.
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;
        let command = FightBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
        };

        let result = handle_fight_battle(&command, rng_ref, &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert_eq!(arena.contestant(a.id).unwrap().wins, 1);
    }

    #[tokio::test]
    async fn test_fight_with_dead_combatant_is_invalid() {
        let (arena, mut a, _, battle) = arena_with_pending_battle();
        a.status = ContestantStatus::Dead;
        arena.put_contestant(a);
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;
        let command = FightBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
        };

        let result = handle_fight_battle(&command, rng_ref, &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert!(!arena.battle(battle.id).unwrap().is_resolved());
    }

    // --- update ---

    #[tokio::test]
    async fn test_update_repairs_pending_battle() {
        let (arena, a, _, battle) = arena_with_pending_battle();
        let c = Contestant::new(Uuid::new_v4(), "Ciro", 4, 4);
        arena.put_contestant(c.clone());
        let command = UpdateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
            patch: BattlePatch {
                contestant_1_id: None,
                contestant_2_id: Some(c.id),
            },
        };

        let updated = handle_update_battle(&command, &arena, &arena).await.unwrap();

        assert_eq!(updated.contestant_1_id, a.id);
        assert_eq!(updated.contestant_2_id, c.id);
        assert_eq!(updated.date, battle.date);
        assert_eq!(arena.battle(battle.id).unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_with_unknown_contestant_is_not_found() {
        let (arena, _, _, battle) = arena_with_pending_battle();
        let command = UpdateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
            patch: BattlePatch {
                contestant_1_id: Some(Uuid::new_v4()),
                contestant_2_id: None,
            },
        };

        let result = handle_update_battle(&command, &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(arena.battle(battle.id).unwrap(), battle);
    }

    #[tokio::test]
    async fn test_update_cannot_repair_resolved_battle() {
        let (arena, a, _, battle) = arena_with_pending_battle();
        handle_end_battle(&end_command(battle.id, a.id, false), &arena, &arena)
            .await
            .unwrap();
        let c = Contestant::new(Uuid::new_v4(), "Ciro", 4, 4);
        arena.put_contestant(c.clone());
        let command = UpdateBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
            patch: BattlePatch {
                contestant_1_id: Some(c.id),
                contestant_2_id: None,
            },
        };

        let result = handle_update_battle(&command, &arena, &arena).await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert_eq!(arena.battle(battle.id).unwrap().contestant_1_id, a.id);
    }

    // --- delete ---

    #[tokio::test]
    async fn test_delete_keeps_contestant_records() {
        let (arena, a, b, battle) = arena_with_pending_battle();
        handle_end_battle(&end_command(battle.id, a.id, true), &arena, &arena)
            .await
            .unwrap();
        let a_before = arena.contestant(a.id).unwrap();
        let b_before = arena.contestant(b.id).unwrap();

        let command = DeleteBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: battle.id,
        };
        handle_delete_battle(&command, &arena).await.unwrap();

        assert!(arena.battle(battle.id).is_none());
        assert_eq!(arena.contestant(a.id).unwrap(), a_before);
        assert_eq!(arena.contestant(b.id).unwrap(), b_before);
    }

    #[tokio::test]
    async fn test_delete_missing_battle_is_not_found() {
        let arena = InMemoryArena::new();
        let command = DeleteBattle {
            correlation_id: Uuid::new_v4(),
            battle_id: Uuid::new_v4(),
        };

        let result = handle_delete_battle(&command, &arena).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
