//! Subcommand implementations.

pub mod config;
pub mod fetch;
pub mod watch;
