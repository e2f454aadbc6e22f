//! Utility functions for CLI operations.
//!
//! This module holds the global options shared by every command, the
//! argument parsers for `-D` and `-f`, and the translation of global options
//! into a configured [`PropertiesBuilder`].

use crate::error::CliError;
use clap::ArgMatches;
use strata::{Properties, PropertiesBuilder};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Placeholder start delimiter.
    pub start_delimiter: String,

    /// Placeholder end delimiter.
    pub end_delimiter: String,

    /// Separator between a placeholder key and its default.
    pub default_separator: String,

    /// Leave unresolvable placeholders as literal text.
    pub ignore_unresolvable: bool,

    /// Fold keys to lower case.
    pub case_insensitive: bool,

    /// Skip environment variables.
    pub no_env: bool,

    /// System properties from `-D`.
    pub defines: Vec<(String, String)>,

    /// Files from `-f` and `--optional-file`, in command-line order.
    pub files: Vec<FileSpec>,
}

/// A file location with an optional explicit priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Path, possibly with `file:` prefix or `~`.
    pub location: String,
    /// Priority; the builder default applies when absent.
    pub priority: Option<u32>,
    /// Set for `--optional-file`: a missing file reads as empty.
    pub optional: bool,
}

/// Parses `KEY=VALUE`. The value may itself contain `=`.
pub fn parse_define(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses `PATH` or `PATH@PRIORITY`.
///
/// A suffix after the last `@` that is not a number is kept as part of the
/// path.
pub fn parse_file_spec(s: &str) -> Result<FileSpec, String> {
    if s.is_empty() {
        return Err("empty file path".to_string());
    }
    if let Some((location, priority)) = s.rsplit_once('@') {
        if let Ok(priority) = priority.parse::<u32>() {
            if location.is_empty() {
                return Err(format!("empty file path in '{s}'"));
            }
            return Ok(FileSpec {
                location: location.to_string(),
                priority: Some(priority),
                optional: false,
            });
        }
    }
    Ok(FileSpec {
        location: s.to_string(),
        priority: None,
        optional: false,
    })
}

/// Interleaves required and optional files by their argument positions.
///
/// Specs without a known position keep their relative order after the
/// positioned ones.
pub fn interleave_files(
    files: Vec<FileSpec>,
    file_indices: Vec<usize>,
    optional_files: Vec<FileSpec>,
    optional_indices: Vec<usize>,
) -> Vec<FileSpec> {
    let positioned = |indices: Vec<usize>| indices.into_iter().chain(std::iter::repeat(usize::MAX));

    let mut ordered: Vec<(usize, FileSpec)> = positioned(file_indices)
        .zip(files)
        .chain(
            positioned(optional_indices).zip(
                optional_files
                    .into_iter()
                    .map(|spec| FileSpec { optional: true, ..spec }),
            ),
        )
        .collect();
    ordered.sort_by_key(|(index, _)| *index);
    ordered.into_iter().map(|(_, spec)| spec).collect()
}

/// Orders the parsed `-f` and `--optional-file` values as they appeared on
/// the command line.
pub fn files_in_command_line_order(
    matches: &ArgMatches,
    files: Vec<FileSpec>,
    optional_files: Vec<FileSpec>,
) -> Vec<FileSpec> {
    let indices = |id: &str| {
        matches
            .indices_of(id)
            .map(|positions| positions.collect::<Vec<usize>>())
            .unwrap_or_default()
    };
    interleave_files(
        files,
        indices("files"),
        optional_files,
        indices("optional_files"),
    )
}

impl GlobalOptions {
    /// Translates the global options into a configured builder.
    pub fn builder(&self) -> Result<PropertiesBuilder, CliError> {
        if self.start_delimiter.is_empty() || self.end_delimiter.is_empty() {
            return Err(CliError::InvalidArguments(
                "placeholder delimiters must not be empty".to_string(),
            ));
        }

        let mut builder = PropertiesBuilder::new()
            .delimiters(self.start_delimiter.as_str(), self.end_delimiter.as_str())
            .default_value_separator(self.default_separator.as_str())
            .ignore_unresolvable_placeholders(self.ignore_unresolvable)
            .case_sensitive(!self.case_insensitive)
            .with_system_properties(self.defines.iter().cloned());

        if self.no_env {
            builder = builder.skip_env();
        }

        for file in &self.files {
            let location = file.location.as_str();
            builder = match (file.optional, file.priority) {
                (false, Some(priority)) => builder.add_file_with_priority(location, priority),
                (false, None) => builder.add_file(location),
                (true, Some(priority)) => builder.add_optional_file_with_priority(location, priority),
                (true, None) => builder.add_optional_file(location),
            };
        }

        Ok(builder)
    }
}

/// Builds the properties described by the global options.
pub fn build_properties(global: &GlobalOptions) -> Result<Properties, CliError> {
    Ok(global.builder()?.build()?)
}
