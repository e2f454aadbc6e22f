//! Get command implementation.

use crate::error::CliError;
use crate::utils::{build_properties, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Print the value of one property.
#[derive(Args)]
pub struct GetCommand {
    /// Property key
    pub key: String,

    /// Value to print when the key is absent
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let properties = build_properties(global)?;

        let value = match (properties.get(&self.key), self.default) {
            (Some(value), _) => value.to_string(),
            (None, Some(default)) => default,
            (None, None) => {
                return Err(CliError::SemanticFailure(format!(
                    "property '{}' not found",
                    self.key
                )))
            }
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{value}")?;
        Ok(())
    }
}
