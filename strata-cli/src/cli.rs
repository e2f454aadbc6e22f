//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including the global source and resolver options and the subcommands.

use crate::commands::{
    CheckCommand, CompletionsCommand, GetCommand, ResolveCommand, TokensCommand,
};
use crate::utils::{parse_define, parse_file_spec, FileSpec};
use clap::{Parser, Subcommand};
use strata::resolver::{DEFAULT_END_DELIMITER, DEFAULT_START_DELIMITER, DEFAULT_VALUE_SEPARATOR};

/// Command-line tool for resolving layered configuration properties.
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Resolve layered configuration properties", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Placeholder start delimiter
    #[arg(
        long,
        value_name = "DELIM",
        global = true,
        env = "STRATA_START_DELIMITER",
        default_value = DEFAULT_START_DELIMITER
    )]
    pub start_delimiter: String,

    /// Placeholder end delimiter
    #[arg(
        long,
        value_name = "DELIM",
        global = true,
        env = "STRATA_END_DELIMITER",
        default_value = DEFAULT_END_DELIMITER
    )]
    pub end_delimiter: String,

    /// Separator between a placeholder key and its default value
    #[arg(
        long,
        value_name = "SEP",
        global = true,
        env = "STRATA_DEFAULT_SEPARATOR",
        default_value = DEFAULT_VALUE_SEPARATOR
    )]
    pub default_separator: String,

    /// Leave unresolvable placeholders as literal text
    #[arg(long, global = true, env = "STRATA_IGNORE_UNRESOLVABLE")]
    pub ignore_unresolvable: bool,

    /// Treat keys case-insensitively
    #[arg(long, global = true, env = "STRATA_CASE_INSENSITIVE")]
    pub case_insensitive: bool,

    /// Do not read environment variables
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Define a system property (repeatable)
    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        global = true,
        value_parser = parse_define
    )]
    pub defines: Vec<(String, String)>,

    /// Read a properties or YAML file, optionally at a priority (repeatable)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH[@PRIORITY]",
        global = true,
        value_parser = parse_file_spec
    )]
    pub files: Vec<FileSpec>,

    /// Read a file if it exists, optionally at a priority (repeatable)
    #[arg(
        long = "optional-file",
        value_name = "PATH[@PRIORITY]",
        global = true,
        value_parser = parse_file_spec
    )]
    pub optional_files: Vec<FileSpec>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print every resolved property
    Resolve(ResolveCommand),

    /// Print the value of one property
    Get(GetCommand),

    /// Verify that every placeholder resolves
    Check(CheckCommand),

    /// Show the placeholder tokens found in a text
    Tokens(TokensCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
