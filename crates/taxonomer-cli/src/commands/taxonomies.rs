//! Taxonomies command implementation.

use crate::error::Result;
use crate::output::Formatter;
use taxonomer_classifier::ClassifierConfig;

/// Execute the taxonomies command.
pub fn execute_taxonomies(config: &ClassifierConfig, formatter: &Formatter) -> Result<()> {
    let table = config.taxonomy_table()?;
    println!("{}", formatter.format_taxonomies(&table, config)?);
    Ok(())
}
