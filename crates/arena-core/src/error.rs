//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced battle or contestant does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up (`"battle"`, `"contestant"`).
        entity: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// The operation is not allowed in the current state of the entities
    /// involved. Raised before any write is attempted.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An infrastructure/persistence error. Nothing was committed; the
    /// operation may be retried from scratch.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a missing battle.
    #[must_use]
    pub fn battle_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "battle",
            id,
        }
    }

    /// Shorthand for a missing contestant.
    #[must_use]
    pub fn contestant_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "contestant",
            id,
        }
    }
}
