//! Taxonomer CLI library.
//!
//! This library provides the core functionality for the Taxonomer command-line interface,
//! including configuration loading, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{apply_overrides, load_config, log_level, OutputFormat, Overrides};
pub use error::{CliError, Result};
pub use output::Formatter;
