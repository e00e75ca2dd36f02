//! Subcommand implementations.

pub mod clear;
pub mod record;
pub mod show;
