//! Route modules.

pub mod battles;
pub mod health;
