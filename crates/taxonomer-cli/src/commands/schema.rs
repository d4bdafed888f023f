//! Schema command implementation.

use crate::error::Result;
use crate::output::Formatter;
use taxonomer_classifier::{generate_schema, ClassifierConfig};

/// Execute the schema command.
pub fn execute_schema(config: &ClassifierConfig, formatter: &Formatter) -> Result<()> {
    let schema = generate_schema(config);
    let has_properties = schema["properties"].as_object().is_some_and(|props| !props.is_empty());
    if !has_properties {
        eprintln!("{}", formatter.info("No taxonomy is both enabled and present in struct"));
    }

    println!("{}", formatter.format_schema(&schema)?);
    Ok(())
}
