//! Prompt composition for content classification

use crate::config::ClassifierConfig;
use taxonomer_domain::TaxonomyTable;

/// System message sent ahead of every classification prompt
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that classifies and generates output in JSON.";

/// Final sentence of every prompt
pub const CLOSING_INSTRUCTION: &str = "Return response in complete json format.";

/// Opening instruction with the content interpolated verbatim
///
/// Single-spaced like the taxonomy instructions; the `\` continuation below
/// drops the leading indentation of the next line.
fn base_instruction(content: &str) -> String {
    format!(
        "Given the content perform an IAB and demographics classification based on your knowledge. \
         Webpage to classify is as follows: {}.",
        content
    )
}

/// Builds the user prompt for a classification call
///
/// Clauses are appended in table order, so the output does not depend on the
/// order keys appear in the configuration.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    taxonomies: TaxonomyTable,
}

impl PromptComposer {
    /// Composer over the given taxonomy table
    pub fn new(taxonomies: TaxonomyTable) -> Self {
        Self { taxonomies }
    }

    /// Taxonomies this composer knows about
    pub fn taxonomies(&self) -> &TaxonomyTable {
        &self.taxonomies
    }

    /// Build the complete classification prompt
    pub fn build_prompt(&self, content: &str, config: &ClassifierConfig) -> String {
        let mut prompt = base_instruction(content);

        for spec in self.taxonomies.iter() {
            if config.is_enabled(&spec.name) {
                prompt.push(' ');
                prompt.push_str(&spec.instruction);
            }
        }

        prompt.push(' ');
        prompt.push_str(CLOSING_INSTRUCTION);
        prompt
    }
}
