//! Shared test doubles for the arena battle engine.

mod clock;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use repository::{FailingBattleRepository, InMemoryArena};
pub use rng::{MockRng, SequenceRng};
