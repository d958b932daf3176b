//! Shared application state.

use std::sync::{Arc, Mutex};

use arena_core::clock::Clock;
use arena_core::repository::{BattleRepository, ContestantDirectory};
use arena_core::rng::DeterministicRng;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stamps new battles.
    pub clock: Arc<dyn Clock>,
    /// Random source for the combat resolver.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Contestant lookups and record updates.
    pub contestants: Arc<dyn ContestantDirectory>,
    /// Battle storage.
    pub battles: Arc<dyn BattleRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        contestants: Arc<dyn ContestantDirectory>,
        battles: Arc<dyn BattleRepository>,
    ) -> Self {
        Self {
            clock,
            rng,
            contestants,
            battles,
        }
    }
}
