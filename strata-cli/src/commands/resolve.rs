//! Resolve command implementation.
//!
//! This module implements the `resolve` command, which prints every
//! resolved property in various formats (properties, JSON, YAML, CSV, TSV).

use crate::error::CliError;
use crate::utils::{build_properties, GlobalOptions};
use clap::{Args, ValueEnum};
use std::io::Write;
use strata::Properties;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 2] = ["key", "value"];

/// Print every resolved property.
#[derive(Args)]
pub struct ResolveCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "properties",
        env = "STRATA_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

/// Output format for the resolve command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key=value` lines, escaped so they can be read back
    Properties,
    /// JSON object
    Json,
    /// YAML mapping
    Yaml,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let properties = build_properties(global)?;

        match self.format {
            OutputFormat::Properties => format_as_properties(&properties),
            OutputFormat::Json => format_as_json(&properties),
            OutputFormat::Yaml => format_as_yaml(&properties),
            OutputFormat::Csv => format_as_delimited(&properties, b','),
            OutputFormat::Tsv => format_as_delimited(&properties, b'\t'),
        }
    }
}

/// Format properties as `key=value` lines.
fn format_as_properties(properties: &Properties) -> Result<(), CliError> {
    let mut handle = std::io::stdout().lock();
    for (key, value) in properties.iter() {
        writeln!(handle, "{}={}", escape(key, true), escape(value, false))?;
    }
    Ok(())
}

/// Escapes text so the properties parser reads it back unchanged.
fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if is_key && index == 0 => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || index == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}

/// Format properties as a JSON object.
fn format_as_json(properties: &Properties) -> Result<(), CliError> {
    let mut handle = std::io::stdout().lock();

    serde_json::to_writer_pretty(&mut handle, properties)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;
    Ok(())
}

/// Format properties as a YAML mapping.
fn format_as_yaml(properties: &Properties) -> Result<(), CliError> {
    let mut handle = std::io::stdout().lock();

    serde_yaml::to_writer(&mut handle, properties)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format properties as delimited output (CSV or TSV).
fn format_as_delimited(properties: &Properties, delimiter: u8) -> Result<(), CliError> {
    let handle = std::io::stdout().lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for (key, value) in properties.iter() {
        writer.write_record([key, value]).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_key() {
        assert_eq!(escape("a.b", true), "a.b");
        assert_eq!(escape("a=b:c", true), "a\\=b\\:c");
        assert_eq!(escape("#a", true), "\\#a");
        assert_eq!(escape("a b", true), "a\\ b");
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape("http://x:1/a=b", false), "http://x:1/a=b");
        assert_eq!(escape(" lead", false), "\\ lead");
        assert_eq!(escape("a b", false), "a b");
        assert_eq!(escape("C:\\tmp\nx", false), "C:\\\\tmp\\nx");
    }

    #[test]
    fn test_escaped_output_reads_back() {
        let text = format!("{}={}", escape("we:ird key", true), escape(" v\\al\tue", false));
        let map = strata::source::properties::parse(&text, "roundtrip").unwrap();
        assert_eq!(map["we:ird key"].value(), " v\\al\tue");
    }
}
