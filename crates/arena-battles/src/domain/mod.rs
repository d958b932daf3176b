//! Domain layer: the combat resolver and coordinator commands.

pub mod combat;
pub mod commands;
