//! CLI, configuration, and update orchestration
//!
//! This crate provides the `icstidy` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;
pub mod update;

pub use cli::Cli;
pub use error::{CliError, CliResult};
