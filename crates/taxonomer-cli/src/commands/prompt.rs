//! Prompt command implementation.

use super::read_content;
use crate::cli::ContentArgs;
use crate::error::Result;
use crate::output::Formatter;
use taxonomer_classifier::{build_request, ClassifierConfig, PromptComposer};

/// Execute the prompt command.
pub fn execute_prompt(args: &ContentArgs, config: &ClassifierConfig, formatter: &Formatter) -> Result<()> {
    let content = read_content(args)?;
    let composer = PromptComposer::new(config.taxonomy_table()?);
    let request = build_request(config, &composer, &content);

    println!("{}", formatter.format_request(&request)?);
    Ok(())
}
