//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::Value;
use taxonomer_classifier::{Classification, ClassifierConfig, TaxonomyTable};
use taxonomer_domain::classification::label_texts;
use taxonomer_domain::CompletionRequest;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a classification outcome.
    ///
    /// In JSON mode an unavailable outcome prints the sentinel object, so
    /// callers piping the output see the same shape either way.
    pub fn format_classification(&self, outcome: &Classification) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcome.to_json())?),
            OutputFormat::Table => Ok(self.format_classification_table(outcome)),
        }
    }

    /// Format a classification as a table.
    fn format_classification_table(&self, outcome: &Classification) -> String {
        let labels = match outcome {
            Classification::Labeled(labels) => labels,
            Classification::Unavailable { reason } => {
                return self.error(&format!("Classification unavailable: {}", reason));
            }
        };

        if labels.is_empty() {
            return self.colorize("No labels returned.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Taxonomy", "Labels"]);

        for (name, value) in labels {
            builder.push_record([name.clone(), label_texts(value).join(", ")]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One-line status for a classification outcome.
    pub fn classification_status(&self, outcome: &Classification) -> String {
        match outcome {
            Classification::Labeled(labels) => {
                let noun = if labels.len() == 1 { "taxonomy" } else { "taxonomies" };
                self.success(&format!("Classified into {} {}", labels.len(), noun))
            }
            Classification::Unavailable { .. } => self.warning("Inference server returned no classification"),
        }
    }

    /// Format the derived output schema.
    pub fn format_schema(&self, schema: &Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(schema)?)
    }

    /// Format a completion request as it would be sent.
    pub fn format_request(&self, request: &CompletionRequest) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(request)?),
            OutputFormat::Table => {
                let mut sections = Vec::with_capacity(request.messages.len());
                for message in &request.messages {
                    let role = format!("{:?}", message.role).to_lowercase();
                    sections.push(format!("{}\n{}", self.colorize(&format!("[{}]", role), "cyan"), message.content));
                }
                Ok(sections.join("\n\n"))
            }
        }
    }

    /// Format the taxonomy table against a configuration.
    pub fn format_taxonomies(&self, table: &TaxonomyTable, config: &ClassifierConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<Value> = table
                    .iter()
                    .map(|spec| {
                        serde_json::json!({
                            "name": spec.name,
                            "enabled": config.is_enabled(&spec.name),
                            "in_struct": config.examples.contains_key(&spec.name),
                            "instruction": spec.instruction,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Taxonomy", "Enabled", "In struct", "Instruction"]);

                for spec in table.iter() {
                    builder.push_record([
                        spec.name.clone(),
                        yes_no(config.is_enabled(&spec.name)).to_string(),
                        yes_no(config.examples.contains_key(&spec.name)).to_string(),
                        spec.instruction.clone(),
                    ]);
                }

                let mut rendered = builder.build();
                rendered
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut output = rendered.to_string();
                for name in config.examples.keys() {
                    if !config.is_enabled(name) {
                        output.push('\n');
                        output.push_str(&self.warning(&format!(
                            "'{}' has a struct example but is not enabled; it is left out of the schema",
                            name
                        )));
                    }
                }
                Ok(output)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
