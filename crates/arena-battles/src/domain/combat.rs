//! Combat resolver.
//!
//! Pure computation: given two contestant snapshots and a random source,
//! decides who wins and who gets hurt. Win probability is proportional to
//! each combatant's power (`strength + agility`).

use arena_core::contestant::Contestant;
use arena_core::rng::DeterministicRng;
use uuid::Uuid;

/// Probability that the loser dies.
pub const DEATH_PROBABILITY: f64 = 0.5;

/// Probability that the winner comes out injured.
pub const WINNER_INJURY_PROBABILITY: f64 = 0.6;

/// Separator between conditions in the injury summary.
pub const INJURY_SEPARATOR: &str = " | ";

/// Computed result of one battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The winning combatant.
    pub winner_id: Uuid,
    /// The losing combatant.
    pub loser_id: Uuid,
    /// Whether the loser died.
    pub death_occurred: bool,
    /// Whether the winner was injured.
    pub winner_injured: bool,
    /// Whether the loser was injured. Always `!death_occurred`.
    pub loser_injured: bool,
    /// Human-readable summary of the true conditions.
    pub injuries: String,
}

/// Resolves a battle between `c1` and `c2`.
///
/// Draws, in order: one weighted draw for the winner (skipped when both
/// combatants have zero power, in which case `c1` wins), one for death and
/// one for the winner's injury.
pub fn resolve(c1: &Contestant, c2: &Contestant, rng: &mut dyn DeterministicRng) -> Outcome {
    let (winner, loser) = pick_winner(c1, c2, rng);

    let death_occurred = rng.chance(DEATH_PROBABILITY);
    let winner_injured = rng.chance(WINNER_INJURY_PROBABILITY);
    let loser_injured = !death_occurred;

    let injuries = injury_summary(
        &winner.name,
        &loser.name,
        winner_injured,
        loser_injured,
        death_occurred,
    );

    Outcome {
        winner_id: winner.id,
        loser_id: loser.id,
        death_occurred,
        winner_injured,
        loser_injured,
        injuries,
    }
}

#[allow(clippy::cast_precision_loss)]
fn pick_winner<'a>(
    c1: &'a Contestant,
    c2: &'a Contestant,
    rng: &mut dyn DeterministicRng,
) -> (&'a Contestant, &'a Contestant) {
    let power_1 = c1.power();
    let total = power_1 + c2.power();
    if total == 0 {
        return (c1, c2);
    }

    let roll = rng.next_f64() * total as f64;
    if roll < power_1 as f64 {
        (c1, c2)
    } else {
        (c2, c1)
    }
}

/// Builds the injury summary, e.g.
/// `"Ganador (Rufo) herido | Perdedor (Tito) muerto"`.
///
/// Only true conditions appear, in the order winner injured, loser injured,
/// loser dead. Empty when none are true.
#[must_use]
pub fn injury_summary(
    winner_name: &str,
    loser_name: &str,
    winner_injured: bool,
    loser_injured: bool,
    death_occurred: bool,
) -> String {
    let conditions = [
        (winner_injured, "Ganador", winner_name, "herido"),
        (loser_injured, "Perdedor", loser_name, "herido"),
        (death_occurred, "Perdedor", loser_name, "muerto"),
    ];

    conditions
        .iter()
        .filter(|(present, ..)| *present)
        .map(|(_, role, name, outcome)| format!("{role} ({name}) {outcome}"))
        .collect::<Vec<_>>()
        .join(INJURY_SEPARATOR)
}
