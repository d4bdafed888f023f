//! Configuration for the Classifier
//!
//! A configuration is a flat mapping. Known keys (`host`, `max_tokens`, ...)
//! land in typed fields; every other top-level key is a taxonomy flag whose
//! truthiness decides whether that taxonomy is requested.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use taxonomer_domain::{TaxonomySpec, TaxonomyTable};
use taxonomer_llm::{remote, LocalModelOptions, RemoteBackend};
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse JSON
    #[error("Failed to parse config JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Classifier configuration
///
/// Immutable once handed to a `Classifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Model weights (in-process backend only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,

    /// Inference server base URL (remote backend only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Backend logging toggle
    #[serde(default)]
    pub verbose: bool,

    /// Generation length cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Remote request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Example value per taxonomy, used to infer the output schema
    #[serde(rename = "struct", default)]
    pub examples: BTreeMap<String, Value>,

    /// Custom taxonomies appended after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxonomies: Vec<TaxonomySpec>,

    /// Taxonomy flags (`IAB_categories = true`, ...)
    #[serde(flatten)]
    pub flags: BTreeMap<String, Value>,
}

fn default_host() -> String {
    remote::DEFAULT_HOST.to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f64 {
    0.1
}

fn default_timeout_secs() -> u64 {
    remote::DEFAULT_TIMEOUT_SECS
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            host: default_host(),
            verbose: false,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            examples: BTreeMap::new(),
            taxonomies: Vec::new(),
            flags: BTreeMap::new(),
        }
    }
}

/// Truthiness of a flag value
///
/// `false`, `null`, `0`, `""`, `[]` and `{}` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

impl ClassifierConfig {
    /// Whether the taxonomy flag `name` is truthy
    pub fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(is_truthy)
    }

    /// Set a taxonomy flag to `true`
    pub fn enable(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into(), Value::Bool(true));
        self
    }

    /// Add a schema example for a taxonomy
    pub fn with_example(mut self, name: impl Into<String>, example: Value) -> Self {
        self.examples.insert(name.into(), example);
        self
    }

    /// Set the inference server URL
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the model weights path
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Append a custom taxonomy
    pub fn with_taxonomy(mut self, spec: TaxonomySpec) -> Self {
        self.taxonomies.push(spec);
        self
    }

    /// Get the remote timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Built-in taxonomies followed by the configured custom ones
    pub fn taxonomy_table(&self) -> Result<TaxonomyTable, ConfigError> {
        TaxonomyTable::with_custom(self.taxonomies.iter().cloned()).map_err(ConfigError::Invalid)
    }

    /// Validate the settings every backend relies on
    ///
    /// Backend-specific keys (`host`, `timeout_secs`, `model_path`) are
    /// checked by the backend when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be greater than 0".to_string()));
        }
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        self.taxonomy_table()?;
        Ok(())
    }

    /// Options for loading an in-process model
    pub fn local_model_options(&self) -> LocalModelOptions {
        LocalModelOptions::new(self.model_path.clone().unwrap_or_default()).with_verbose(self.verbose)
    }

    /// Remote backend for `host`
    pub fn remote_backend(&self) -> Result<RemoteBackend, taxonomer_llm::BackendError> {
        Ok(RemoteBackend::new(&self.host, self.timeout())?.with_verbose(self.verbose))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            Some("json") => Self::from_json(&contents),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
