//! `PostgreSQL` storage for battles and contestants.
//!
//! Implements the persistence ports from `arena-core`. Resolution commits
//! run inside a single transaction.

pub mod error;
pub mod pg_battle_repository;
pub mod pg_contestant_directory;
