//! Taxonomer Classifier
//!
//! Classifies text content into configurable taxonomies using an LLM whose
//! output is constrained to a JSON schema derived from the configuration.
//!
//! # Overview
//!
//! A declarative configuration is turned into two things on every call:
//! a JSON schema describing the expected output, and a prompt whose
//! instructions are assembled to match it. Both go to a completion backend,
//! in-process or remote, and the model's JSON answer is decoded into a
//! mapping from taxonomy name to labels.
//!
//! # Architecture
//!
//! ```text
//! config ──► SchemaBuilder ──► schema ─┐
//!                                       ├─► CompletionBackend ──► decode ──► Classification
//! content ─► PromptComposer ─► prompt ─┘
//! ```
//!
//! # Key Features
//!
//! - **Schema inference**: Output shape inferred from example values in `struct`
//! - **Deterministic prompts**: Clauses appended in fixed taxonomy order
//! - **Pluggable backends**: Remote HTTP server or in-process model
//! - **Explicit failure**: Backend outages surface as `Classification::Unavailable`
//!
//! # Example Usage
//!
//! ```no_run
//! use taxonomer_classifier::{Classifier, ClassifierConfig};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClassifierConfig::default()
//!     .enable("IAB_categories")
//!     .enable("Topics")
//!     .with_example("IAB_categories", json!(["IAB1", "IAB2", "IAB3"]))
//!     .with_example("Topics", json!(["Topic1", "Topic2"]));
//!
//! let classifier = Classifier::remote(config)?;
//! let outcome = classifier.classify("Villa living embodies a unique blend of luxury...")?;
//!
//! match outcome.labels() {
//!     Some(labels) => println!("{}", serde_json::to_string_pretty(labels)?),
//!     None => println!("{}", outcome.to_json()),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod prompt;
mod response;
mod schema;

#[cfg(test)]
mod tests;

pub use classifier::{build_request, Classifier};
pub use config::{is_truthy, ClassifierConfig, ConfigError};
pub use error::ClassifierError;
pub use prompt::{PromptComposer, CLOSING_INSTRUCTION, SYSTEM_PROMPT};
pub use response::decode_content;
pub use schema::{generate_schema, SchemaBuilder};
pub use taxonomer_domain::{Classification, ClassificationResult, Taxonomy, TaxonomySpec, TaxonomyTable};
