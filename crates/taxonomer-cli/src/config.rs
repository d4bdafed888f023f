//! Configuration loading for the CLI.

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use taxonomer_classifier::ClassifierConfig;
use tracing::debug;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Command-line values layered on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Taxonomies to switch on
    pub enable: Vec<String>,
    /// Inference server URL
    pub host: Option<String>,
    /// Generation length cap
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f64>,
    /// Backend verbosity
    pub verbose: bool,
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Get the default configuration file path (`~/.taxonomer/config.toml`).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".taxonomer").join("config.toml"))
}

/// Load the classifier configuration.
///
/// An explicit path must exist. Without one, the default file is used when
/// present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ClassifierConfig> {
    if let Some(path) = explicit {
        debug!("Loading config from {}", path.display());
        return Ok(ClassifierConfig::from_file(path)?);
    }

    match config_path() {
        Some(path) if path.exists() => {
            debug!("Loading config from {}", path.display());
            Ok(ClassifierConfig::from_file(&path)?)
        }
        _ => {
            debug!("No config file found, using defaults");
            Ok(ClassifierConfig::default())
        }
    }
}

/// Apply command-line overrides and re-validate.
pub fn apply_overrides(mut config: ClassifierConfig, overrides: Overrides) -> Result<ClassifierConfig> {
    for name in overrides.enable {
        if name.trim().is_empty() {
            return Err(CliError::InvalidInput("Taxonomy name cannot be empty".to_string()));
        }
        config = config.enable(name);
    }
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(max_tokens) = overrides.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(temperature) = overrides.temperature {
        config.temperature = temperature;
    }
    config.verbose |= overrides.verbose;

    config.validate()?;
    Ok(config)
}
