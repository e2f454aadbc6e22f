//! Build script for strata-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here as well.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered configuration properties")
        .long_about(
            "Merge properties from files, environment variables and definitions by priority, \
             then resolve ${key} placeholders across the merged result",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("start-delimiter")
                .long("start-delimiter")
                .help("Placeholder start delimiter")
                .value_name("DELIM")
                .global(true)
                .env("STRATA_START_DELIMITER"),
        )
        .arg(
            Arg::new("end-delimiter")
                .long("end-delimiter")
                .help("Placeholder end delimiter")
                .value_name("DELIM")
                .global(true)
                .env("STRATA_END_DELIMITER"),
        )
        .arg(
            Arg::new("default-separator")
                .long("default-separator")
                .help("Separator between a placeholder key and its default value")
                .value_name("SEP")
                .global(true)
                .env("STRATA_DEFAULT_SEPARATOR"),
        )
        .arg(
            Arg::new("ignore-unresolvable")
                .long("ignore-unresolvable")
                .help("Leave unresolvable placeholders as literal text")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("STRATA_IGNORE_UNRESOLVABLE"),
        )
        .arg(
            Arg::new("case-insensitive")
                .long("case-insensitive")
                .help("Treat keys case-insensitively")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("STRATA_CASE_INSENSITIVE"),
        )
        .arg(
            Arg::new("no-env")
                .long("no-env")
                .help("Do not read environment variables")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .long("define")
                .help("Define a system property (repeatable)")
                .value_name("KEY=VALUE")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Read a properties or YAML file, optionally at a priority (repeatable)")
                .value_name("PATH[@PRIORITY]")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("optional-file")
                .long("optional-file")
                .help("Read a file if it exists, optionally at a priority (repeatable)")
                .value_name("PATH[@PRIORITY]")
                .global(true)
                .action(ArgAction::Append),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Print every resolved property")
                .long_about("Print every resolved property as properties, JSON, YAML, CSV or TSV"),
            Command::new("get")
                .about("Print the value of one property")
                .long_about("Print the value of one property, or a default when it is absent"),
            Command::new("check")
                .about("Verify that every placeholder resolves")
                .long_about("Build in strict mode and list every property left unresolved"),
            Command::new("tokens")
                .about("Show the placeholder tokens found in a text")
                .long_about("Print the placeholder tokens found in a text, one per line"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(
        std::env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR not set"))?,
    );
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("strata.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
