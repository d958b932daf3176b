//! Storage error type.

use arena_core::error::DomainError;
use thiserror::Error;

/// Errors raised inside the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected or failed a query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped to a domain value.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// A domain rule failed while the query was being evaluated.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<StoreError> for DomainError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Domain(domain) => domain,
            other => DomainError::Infrastructure(other.to_string()),
        }
    }
}

/// Converts a stored `INTEGER` counter to its domain type.
pub(crate) fn to_count(column: &str, value: i32) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::CorruptRow(format!("{column} is negative: {value}")))
}
