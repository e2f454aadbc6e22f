//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Print every resolved property
//! - `get`: Print a single property
//! - `check`: Verify that every placeholder resolves
//! - `tokens`: Show the placeholder tokens found in a text
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod get;
pub mod resolve;
pub mod tokens;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use get::GetCommand;
pub use resolve::ResolveCommand;
pub use tokens::TokensCommand;
