//! Battle entity.
//!
//! A battle is created unresolved and becomes terminal once a winner is
//! recorded. All outcome fields are fixed together by [`Battle::resolve`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contestant::ContestantTransition;
use crate::error::DomainError;

/// A single bout between two contestants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battle {
    /// Battle identifier.
    pub id: Uuid,
    /// First combatant.
    pub contestant_1_id: Uuid,
    /// Second combatant.
    pub contestant_2_id: Uuid,
    /// Winner, once resolved. Always one of the two combatants.
    pub winner_id: Option<Uuid>,
    /// Whether the loser died.
    pub death_occurred: bool,
    /// Free-text injury summary.
    pub injuries: Option<String>,
    /// Creation timestamp. Never changes.
    pub date: DateTime<Utc>,
}

/// Editable, non-outcome fields of a battle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattlePatch {
    /// Replacement for the first combatant.
    pub contestant_1_id: Option<Uuid>,
    /// Replacement for the second combatant.
    pub contestant_2_id: Option<Uuid>,
}

fn ensure_distinct(contestant_1_id: Uuid, contestant_2_id: Uuid) -> Result<(), DomainError> {
    if contestant_1_id == contestant_2_id {
        return Err(DomainError::InvalidState(
            "a battle needs two distinct contestants".to_owned(),
        ));
    }
    Ok(())
}

impl Battle {
    /// Creates an unresolved battle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if both ids are the same.
    pub fn new(
        id: Uuid,
        contestant_1_id: Uuid,
        contestant_2_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        ensure_distinct(contestant_1_id, contestant_2_id)?;
        Ok(Self {
            id,
            contestant_1_id,
            contestant_2_id,
            winner_id: None,
            death_occurred: false,
            injuries: None,
            date,
        })
    }

    /// Whether a winner has been recorded.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.winner_id.is_some()
    }

    /// Whether the contestant fights in this battle.
    #[must_use]
    pub fn involves(&self, contestant_id: Uuid) -> bool {
        self.contestant_1_id == contestant_id || self.contestant_2_id == contestant_id
    }

    /// The combatant of the pair that is not `winner_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if `winner_id` does not fight in
    /// this battle.
    pub fn loser_for(&self, winner_id: Uuid) -> Result<Uuid, DomainError> {
        if winner_id == self.contestant_1_id {
            Ok(self.contestant_2_id)
        } else if winner_id == self.contestant_2_id {
            Ok(self.contestant_1_id)
        } else {
            Err(DomainError::InvalidState(format!(
                "contestant {winner_id} does not fight in battle {}",
                self.id
            )))
        }
    }

    /// Fixes the outcome and returns the contestant transition to apply.
    ///
    /// An empty `injuries` string is stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if the battle is already resolved
    /// or `winner_id` does not fight in it. The battle is left untouched.
    pub fn resolve(
        &mut self,
        winner_id: Uuid,
        death_occurred: bool,
        injuries: Option<String>,
    ) -> Result<ContestantTransition, DomainError> {
        if self.is_resolved() {
            return Err(DomainError::InvalidState(format!(
                "battle {} is already resolved",
                self.id
            )));
        }
        let loser_id = self.loser_for(winner_id)?;

        self.winner_id = Some(winner_id);
        self.death_occurred = death_occurred;
        self.injuries = injuries.filter(|text| !text.is_empty());

        Ok(ContestantTransition::new(winner_id, loser_id, death_occurred))
    }

    /// Merges a patch into the battle. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if the patch would re-pair a
    /// resolved battle or leave the battle with identical combatants.
    pub fn apply_patch(&mut self, patch: &BattlePatch) -> Result<bool, DomainError> {
        let contestant_1_id = patch.contestant_1_id.unwrap_or(self.contestant_1_id);
        let contestant_2_id = patch.contestant_2_id.unwrap_or(self.contestant_2_id);

        if contestant_1_id == self.contestant_1_id && contestant_2_id == self.contestant_2_id {
            return Ok(false);
        }
        if self.is_resolved() {
            return Err(DomainError::InvalidState(format!(
                "battle {} is resolved; its contestants cannot change",
                self.id
            )));
        }
        ensure_distinct(contestant_1_id, contestant_2_id)?;

        self.contestant_1_id = contestant_1_id;
        self.contestant_2_id = contestant_2_id;
        Ok(true)
    }
}
