//! Persistence ports consumed by the battle coordinator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::battle::Battle;
use crate::contestant::{Contestant, ContestantStatus, ContestantTransition};
use crate::error::DomainError;

/// Lookup and record-keeping for contestants. Contestant lifecycle is owned
/// elsewhere; the engine only reads snapshots and bumps records.
///
/// The record-keeping methods are the single-write collaborator contract.
/// The battle coordinator never calls them: its outcome writes go through
/// [`BattleRepository::commit_resolution`] so they commit atomically.
#[async_trait]
pub trait ContestantDirectory: Send + Sync {
    /// Whether a contestant with this id exists.
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Loads a contestant snapshot.
    ///
    /// Returns `DomainError::NotFound` if absent.
    async fn get(&self, id: Uuid) -> Result<Contestant, DomainError>;

    /// Adds one win. Fails with `InvalidState` if the contestant is dead.
    async fn increment_wins(&self, id: Uuid) -> Result<(), DomainError>;

    /// Adds one loss. Fails with `InvalidState` if the contestant is dead.
    async fn increment_losses(&self, id: Uuid) -> Result<(), DomainError>;

    /// Sets the contestant's status. DEAD is terminal: changing a dead
    /// contestant's status fails with `InvalidState`.
    async fn set_status(&self, id: Uuid, status: ContestantStatus) -> Result<(), DomainError>;
}

/// Storage for battles.
#[async_trait]
pub trait BattleRepository: Send + Sync {
    /// Loads a battle, or `None` if absent.
    async fn find(&self, id: Uuid) -> Result<Option<Battle>, DomainError>;

    /// All battles, most recent `date` first.
    async fn list(&self) -> Result<Vec<Battle>, DomainError>;

    /// Battles the contestant fought in, most recent `date` first.
    async fn list_for_contestant(&self, contestant_id: Uuid) -> Result<Vec<Battle>, DomainError>;

    /// Persists a new battle.
    async fn insert(&self, battle: &Battle) -> Result<(), DomainError>;

    /// Writes the battle's contestant pair, but only while the stored
    /// battle is still unresolved.
    ///
    /// Returns `NotFound` if absent and `InvalidState` if it was resolved in
    /// the meantime.
    async fn update_pairing(&self, battle: &Battle) -> Result<(), DomainError>;

    /// Deletes a battle. Returns `false` if it did not exist. Contestant
    /// records are never touched.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Writes the battle's outcome and applies `transition` to both
    /// combatants as one atomic unit: either all three writes commit or
    /// none do.
    ///
    /// The outcome is written only if the stored battle has no winner yet;
    /// otherwise `InvalidState` is returned and nothing changes. Returns
    /// `NotFound` if the battle or a combatant is missing.
    async fn commit_resolution(
        &self,
        battle: &Battle,
        transition: &ContestantTransition,
    ) -> Result<(), DomainError>;
}
