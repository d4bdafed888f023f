//! Error types for the Classifier

use crate::config::ConfigError;
use taxonomer_llm::BackendError;
use thiserror::Error;

/// Errors that can occur during classification
///
/// A backend that fails at call time is not an error: `classify` reports it
/// as `Classification::Unavailable`. These variants cover construction
/// problems and model output that cannot be decoded.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend could not be constructed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Model content is not a JSON object
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::MalformedOutput(format!("JSON parse error: {}", e))
    }
}
