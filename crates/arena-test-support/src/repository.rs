//! Test repositories: in-memory and failing implementations of the
//! persistence ports.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use arena_core::battle::Battle;
use arena_core::contestant::{Contestant, ContestantStatus, ContestantTransition};
use arena_core::error::DomainError;
use arena_core::repository::{BattleRepository, ContestantDirectory};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Default)]
struct ArenaState {
    contestants: HashMap<Uuid, Contestant>,
    battles: HashMap<Uuid, Battle>,
}

/// Contestants and battles held behind a single mutex, implementing both
/// `ContestantDirectory` and `BattleRepository`.
///
/// `commit_resolution` stages all three writes on copies and swaps them in
/// under the lock, so it behaves like a database transaction. Contestant
/// writes can be made to fail with [`InMemoryArena::fail_contestant_writes`]
/// to exercise rollback paths.
#[derive(Debug, Default)]
pub struct InMemoryArena {
    state: Mutex<ArenaState>,
    contestant_writes_fail: AtomicBool,
}

impl InMemoryArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena pre-populated with contestants.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_contestants(contestants: impl IntoIterator<Item = Contestant>) -> Self {
        let arena = Self::new();
        for contestant in contestants {
            arena.put_contestant(contestant);
        }
        arena
    }

    /// Inserts or replaces a contestant.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put_contestant(&self, contestant: Contestant) {
        self.state
            .lock()
            .unwrap()
            .contestants
            .insert(contestant.id, contestant);
    }

    /// Inserts or replaces a battle, bypassing all checks.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn put_battle(&self, battle: Battle) {
        self.state.lock().unwrap().battles.insert(battle.id, battle);
    }

    /// Returns a snapshot of a contestant.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn contestant(&self, id: Uuid) -> Option<Contestant> {
        self.state.lock().unwrap().contestants.get(&id).cloned()
    }

    /// Returns a snapshot of a battle.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn battle(&self, id: Uuid) -> Option<Battle> {
        self.state.lock().unwrap().battles.get(&id).cloned()
    }

    /// Number of stored battles.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn battle_count(&self) -> usize {
        self.state.lock().unwrap().battles.len()
    }

    /// Makes every subsequent contestant write fail with an
    /// infrastructure error (or succeed again with `false`).
    pub fn fail_contestant_writes(&self, fail: bool) {
        self.contestant_writes_fail.store(fail, Ordering::SeqCst);
    }

    fn check_contestant_writes(&self) -> Result<(), DomainError> {
        if self.contestant_writes_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Infrastructure("connection reset".into()));
        }
        Ok(())
    }

    fn update_living(
        &self,
        id: Uuid,
        update: impl FnOnce(&mut Contestant),
    ) -> Result<(), DomainError> {
        self.check_contestant_writes()?;
        let mut state = self.state.lock().unwrap();
        let contestant = state
            .contestants
            .get_mut(&id)
            .ok_or_else(|| DomainError::contestant_not_found(id))?;
        if !contestant.is_alive() {
            return Err(DomainError::InvalidState(format!(
                "contestant {id} is dead"
            )));
        }
        update(contestant);
        Ok(())
    }
}

fn newest_first(mut battles: Vec<Battle>) -> Vec<Battle> {
    battles.sort_by(|a, b| b.date.cmp(&a.date));
    battles
}

#[async_trait]
impl ContestantDirectory for InMemoryArena {
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.state.lock().unwrap().contestants.contains_key(&id))
    }

    async fn get(&self, id: Uuid) -> Result<Contestant, DomainError> {
        self.contestant(id)
            .ok_or_else(|| DomainError::contestant_not_found(id))
    }

    async fn increment_wins(&self, id: Uuid) -> Result<(), DomainError> {
        self.update_living(id, |c| c.wins += 1)
    }

    async fn increment_losses(&self, id: Uuid) -> Result<(), DomainError> {
        self.update_living(id, |c| c.losses += 1)
    }

    async fn set_status(&self, id: Uuid, status: ContestantStatus) -> Result<(), DomainError> {
        self.update_living(id, |c| c.status = status)
    }
}

#[async_trait]
impl BattleRepository for InMemoryArena {
    async fn find(&self, id: Uuid) -> Result<Option<Battle>, DomainError> {
        Ok(self.battle(id))
    }

    async fn list(&self) -> Result<Vec<Battle>, DomainError> {
        let battles = self.state.lock().unwrap().battles.values().cloned().collect();
        Ok(newest_first(battles))
    }

    async fn list_for_contestant(&self, contestant_id: Uuid) -> Result<Vec<Battle>, DomainError> {
        let battles = self
            .state
            .lock()
            .unwrap()
            .battles
            .values()
            .filter(|b| b.involves(contestant_id))
            .cloned()
            .collect();
        Ok(newest_first(battles))
    }

    async fn insert(&self, battle: &Battle) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.battles.contains_key(&battle.id) {
            return Err(DomainError::Infrastructure(format!(
                "duplicate battle id {}",
                battle.id
            )));
        }
        state.battles.insert(battle.id, battle.clone());
        Ok(())
    }

    async fn update_pairing(&self, battle: &Battle) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .battles
            .get_mut(&battle.id)
            .ok_or_else(|| DomainError::battle_not_found(battle.id))?;
        if stored.is_resolved() {
            return Err(DomainError::InvalidState(format!(
                "battle {} is already resolved",
                battle.id
            )));
        }
        stored.contestant_1_id = battle.contestant_1_id;
        stored.contestant_2_id = battle.contestant_2_id;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.state.lock().unwrap().battles.remove(&id).is_some())
    }

    async fn commit_resolution(
        &self,
        battle: &Battle,
        transition: &ContestantTransition,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();

        let stored = state
            .battles
            .get(&battle.id)
            .ok_or_else(|| DomainError::battle_not_found(battle.id))?;
        if stored.is_resolved() {
            return Err(DomainError::InvalidState(format!(
                "battle {} is already resolved",
                battle.id
            )));
        }
        if (stored.contestant_1_id, stored.contestant_2_id)
            != (battle.contestant_1_id, battle.contestant_2_id)
        {
            return Err(DomainError::InvalidState(format!(
                "battle {} was re-paired since it was loaded",
                battle.id
            )));
        }

        let mut winner = state
            .contestants
            .get(&transition.winner_id)
            .cloned()
            .ok_or_else(|| DomainError::contestant_not_found(transition.winner_id))?;
        let mut loser = state
            .contestants
            .get(&transition.loser_id)
            .cloned()
            .ok_or_else(|| DomainError::contestant_not_found(transition.loser_id))?;
        transition.apply_to(&mut winner, &mut loser)?;
        self.check_contestant_writes()?;

        state.battles.insert(battle.id, battle.clone());
        state.contestants.insert(winner.id, winner);
        state.contestants.insert(loser.id, loser);
        Ok(())
    }
}

/// A battle repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingBattleRepository;

#[async_trait]
impl BattleRepository for FailingBattleRepository {
    async fn find(&self, _id: Uuid) -> Result<Option<Battle>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(&self) -> Result<Vec<Battle>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_for_contestant(&self, _contestant_id: Uuid) -> Result<Vec<Battle>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn insert(&self, _battle: &Battle) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update_pairing(&self, _battle: &Battle) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn commit_resolution(
        &self,
        _battle: &Battle,
        _transition: &ContestantTransition,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
