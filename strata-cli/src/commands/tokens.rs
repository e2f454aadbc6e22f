//! Tokens command implementation.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use std::io::Write;
use strata::tokenizer;

/// Show the placeholder tokens found in a text.
#[derive(Args)]
pub struct TokensCommand {
    /// Text to scan
    pub text: String,

    /// Keep repeated tokens
    #[arg(long)]
    pub all: bool,
}

impl TokensCommand {
    /// Execute the tokens command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if global.start_delimiter.is_empty() || global.end_delimiter.is_empty() {
            return Err(CliError::InvalidArguments(
                "placeholder delimiters must not be empty".to_string(),
            ));
        }

        let tokens = tokenizer::all_tokens(
            &self.text,
            &global.start_delimiter,
            &global.end_delimiter,
            !self.all,
        );

        let mut stdout = std::io::stdout().lock();
        for token in tokens {
            writeln!(stdout, "{token}")?;
        }
        Ok(())
    }
}
