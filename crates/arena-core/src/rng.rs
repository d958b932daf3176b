//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests and replays,
//! a seeded or recorded implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Returns `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

/// Production RNG backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdDeterministicRng(StdRng);

impl StdDeterministicRng {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdDeterministicRng {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
