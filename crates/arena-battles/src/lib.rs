//! Arena: Battle Resolution Engine.
//!
//! Responsible for computing probabilistic battle outcomes and applying
//! them atomically to the battle record and both contestants.

pub mod application;
pub mod domain;
