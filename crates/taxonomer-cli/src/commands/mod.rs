//! Command implementations.

mod classify;
mod prompt;
mod schema;
mod taxonomies;

pub use classify::execute_classify;
pub use prompt::execute_prompt;
pub use schema::execute_schema;
pub use taxonomies::execute_taxonomies;

use crate::cli::ContentArgs;
use crate::error::{CliError, Result};
use std::io::Read;

/// Resolve the content to classify from the text argument, a file, or stdin.
pub fn read_content(args: &ContentArgs) -> Result<String> {
    let content = match (&args.text, &args.file) {
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidInput(
                "Provide either TEXT or --file, not both".to_string(),
            ));
        }
        (Some(text), None) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::InvalidInput("No content to classify".to_string()));
    }
    Ok(content)
}
