//! Classify command implementation.

use super::read_content;
use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use taxonomer_classifier::{Classifier, ClassifierConfig};
use tracing::info;

/// Execute the classify command.
///
/// Returns whether the backend produced labels.
pub fn execute_classify(args: &ClassifyArgs, config: ClassifierConfig, formatter: &Formatter) -> Result<bool> {
    let content = read_content(&args.content)?;

    info!(host = %config.host, "Classifying {} characters", content.chars().count());
    let classifier = Classifier::remote(config)?;
    let outcome = classifier.classify(&content)?;

    println!("{}", formatter.format_classification(&outcome)?);
    eprintln!("{}", formatter.classification_status(&outcome));
    Ok(outcome.is_available())
}
