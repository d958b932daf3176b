//! Arena Core: shared entities and abstractions.
//!
//! This crate defines the battle and contestant entities, the persistence
//! ports the coordinator depends on, and the clock/RNG seams that keep
//! resolution deterministic under test. It contains no infrastructure code.

pub mod battle;
pub mod clock;
pub mod command;
pub mod contestant;
pub mod error;
pub mod repository;
pub mod rng;
