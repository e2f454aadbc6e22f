//! Main entry point for the strata CLI.
//!
//! Builds layered configuration properties from files, environment variables
//! and `-D` definitions, and exposes them through subcommands:
//! - `resolve`: Print every resolved property
//! - `get`: Print a single property
//! - `check`: Verify that every placeholder resolves
//! - `tokens`: Show the placeholder tokens found in a text
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::{CommandFactory, FromArgMatches};
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Route library diagnostics through the same level policy as the CLI
    strata::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        start_delimiter: cli.start_delimiter,
        end_delimiter: cli.end_delimiter,
        default_separator: cli.default_separator,
        ignore_unresolvable: cli.ignore_unresolvable,
        case_insensitive: cli.case_insensitive,
        no_env: cli.no_env,
        defines: cli.defines,
        files: utils::files_in_command_line_order(&matches, cli.files, cli.optional_files),
    };

    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Tokens(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
