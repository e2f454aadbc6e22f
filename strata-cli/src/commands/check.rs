//! Check command implementation.
//!
//! Builds the properties in strict mode regardless of
//! `--ignore-unresolvable` and reports every entry left unresolved.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use std::io::Write;
use strata::Error as LibError;

/// Verify that every placeholder resolves.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let builder = global.builder()?.ignore_unresolvable_placeholders(false);

        match builder.build() {
            Ok(properties) => {
                if !global.quiet {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(
                        stdout,
                        "All placeholders resolved ({} properties)",
                        properties.len()
                    )?;
                }
                Ok(())
            }
            Err(LibError::UnresolvablePlaceholders { entries }) => {
                let mut stdout = std::io::stdout().lock();
                for entry in &entries {
                    writeln!(stdout, "{entry}")?;
                }
                Err(CliError::SemanticFailure(format!(
                    "{} properties hold unresolvable placeholders",
                    entries.len()
                )))
            }
            Err(e) => Err(e.into()),
        }
    }
}
