//! Library exports for strata-cli.
//!
//! This module exports the CLI structure so it can be inspected by tests
//! and documentation tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
