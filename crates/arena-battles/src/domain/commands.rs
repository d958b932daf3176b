//! Commands handled by the battle coordinator.

use arena_core::battle::BattlePatch;
use arena_core::command::Command;
use uuid::Uuid;

/// Command to schedule a battle between two contestants.
#[derive(Debug, Clone)]
pub struct CreateBattle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The identifier to give the new battle.
    pub battle_id: Uuid,
    /// First combatant.
    pub contestant_1_id: Uuid,
    /// Second combatant.
    pub contestant_2_id: Uuid,
}

impl Command for CreateBattle {
    fn command_type(&self) -> &'static str {
        "battles.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to finalize a battle with a caller-supplied outcome.
#[derive(Debug, Clone)]
pub struct EndBattle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The battle to finalize.
    pub battle_id: Uuid,
    /// The winning combatant.
    pub winner_id: Uuid,
    /// Whether the loser died.
    pub death_occurred: bool,
    /// Optional injury summary.
    pub injuries: Option<String>,
}

impl Command for EndBattle {
    fn command_type(&self) -> &'static str {
        "battles.end"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to let the combat resolver decide a pending battle.
#[derive(Debug, Clone)]
pub struct FightBattle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The battle to fight.
    pub battle_id: Uuid,
}

impl Command for FightBattle {
    fn command_type(&self) -> &'static str {
        "battles.fight"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to edit a battle's non-outcome fields.
#[derive(Debug, Clone)]
pub struct UpdateBattle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The battle to edit.
    pub battle_id: Uuid,
    /// Fields to change.
    pub patch: BattlePatch,
}

impl Command for UpdateBattle {
    fn command_type(&self) -> &'static str {
        "battles.update"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a battle record.
#[derive(Debug, Clone)]
pub struct DeleteBattle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The battle to delete.
    pub battle_id: Uuid,
}

impl Command for DeleteBattle {
    fn command_type(&self) -> &'static str {
        "battles.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
