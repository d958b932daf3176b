//! Contestant entity and the state transition applied when a battle is
//! resolved.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::DomainError;

/// Life status of a contestant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContestantStatus {
    /// Able to fight.
    Alive,
    /// Killed in a battle. Terminal.
    Dead,
}

impl ContestantStatus {
    /// Storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alive => "ALIVE",
            Self::Dead => "DEAD",
        }
    }
}

impl fmt::Display for ContestantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestantStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALIVE" => Ok(Self::Alive),
            "DEAD" => Ok(Self::Dead),
            other => Err(DomainError::Infrastructure(format!(
                "unknown contestant status: {other}"
            ))),
        }
    }
}

/// A combat participant as seen by the battle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contestant {
    /// Contestant identifier.
    pub id: Uuid,
    /// Display name, used in injury summaries.
    pub name: String,
    /// Raw strength attribute.
    pub strength: u32,
    /// Raw agility attribute.
    pub agility: u32,
    /// Alive or dead.
    pub status: ContestantStatus,
    /// Battles won.
    pub wins: u32,
    /// Battles lost without dying.
    pub losses: u32,
    /// Owning dictator, if any.
    pub dictator_id: Option<Uuid>,
}

impl Contestant {
    /// Creates a living contestant with an empty record.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, strength: u32, agility: u32) -> Self {
        Self {
            id,
            name: name.into(),
            strength,
            agility,
            status: ContestantStatus::Alive,
            wins: 0,
            losses: 0,
            dictator_id: None,
        }
    }

    /// Combat power: `strength + agility`.
    #[must_use]
    pub fn power(&self) -> u64 {
        u64::from(self.strength) + u64::from(self.agility)
    }

    /// Whether the contestant can still fight.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == ContestantStatus::Alive
    }
}

/// What happens to the loser of a resolved battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoserFate {
    /// The loser survives and gets a loss on the record.
    Defeated,
    /// The loser dies. No loss is recorded.
    Killed,
}

/// Win/loss/death update applied to both combatants of a resolved battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestantTransition {
    /// Gets one more win.
    pub winner_id: Uuid,
    /// Gets a loss or dies, depending on `loser_fate`.
    pub loser_id: Uuid,
    /// Outcome for the loser.
    pub loser_fate: LoserFate,
}

impl ContestantTransition {
    /// Builds the transition for a battle outcome.
    #[must_use]
    pub fn new(winner_id: Uuid, loser_id: Uuid, death_occurred: bool) -> Self {
        let loser_fate = if death_occurred {
            LoserFate::Killed
        } else {
            LoserFate::Defeated
        };
        Self {
            winner_id,
            loser_id,
            loser_fate,
        }
    }

    /// Applies the transition to in-memory snapshots of both combatants.
    ///
    /// Either both snapshots are updated or neither is.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if the snapshots do not match the
    /// transition's ids or if either combatant is already dead.
    pub fn apply_to(
        &self,
        winner: &mut Contestant,
        loser: &mut Contestant,
    ) -> Result<(), DomainError> {
        if winner.id != self.winner_id || loser.id != self.loser_id {
            return Err(DomainError::InvalidState(
                "contestant snapshots do not match the battle outcome".to_owned(),
            ));
        }
        if !winner.is_alive() {
            return Err(DomainError::InvalidState(format!(
                "contestant {} is dead and cannot win",
                winner.id
            )));
        }
        if !loser.is_alive() {
            return Err(DomainError::InvalidState(format!(
                "contestant {} is dead and cannot lose",
                loser.id
            )));
        }

        winner.wins += 1;
        match self.loser_fate {
            LoserFate::Killed => loser.status = ContestantStatus::Dead,
            LoserFate::Defeated => loser.losses += 1,
        }
        Ok(())
    }
}
