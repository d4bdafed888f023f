//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Taxonomer CLI - Classify content into taxonomies with an LLM.
#[derive(Debug, Parser)]
#[command(name = "taxonomer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (.toml or .json)
    #[arg(short, long, global = true, env = "TAXONOMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging and backend verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable a taxonomy on top of the configuration (repeatable)
    #[arg(short, long, global = true, value_name = "TAXONOMY")]
    pub enable: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify content against the inference server
    Classify(ClassifyArgs),

    /// Print the prompt that would be sent, without calling a backend
    Prompt(ContentArgs),

    /// Print the JSON schema derived from the configuration
    Schema,

    /// List taxonomies and whether they are enabled
    Taxonomies,
}

/// Where to read the content to classify from.
#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Content text (read from stdin when neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read content from a file
    #[arg(short = 'i', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Arguments for the classify command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Inference server URL (e.g., http://localhost:8000)
    #[arg(long, env = "TAXONOMER_HOST")]
    pub host: Option<String>,

    /// Generation length cap
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0-2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_command() {
        let cli = Cli::parse_from([
            "taxonomer",
            "classify",
            "Villa living embodies luxury",
            "--host",
            "http://example.com:8000",
            "-e",
            "Gender",
            "--enable",
            "Topics",
        ]);
        assert_eq!(cli.enable, vec!["Gender", "Topics"]);
        match cli.command {
            Command::Classify(args) => {
                assert_eq!(args.content.text.as_deref(), Some("Villa living embodies luxury"));
                assert_eq!(args.host.as_deref(), Some("http://example.com:8000"));
                assert!(args.content.file.is_none());
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_prompt_from_file() {
        let cli = Cli::parse_from(["taxonomer", "prompt", "--file", "page.txt"]);
        match cli.command {
            Command::Prompt(args) => {
                assert_eq!(args.file, Some(PathBuf::from("page.txt")));
                assert!(args.text.is_none());
            }
            _ => panic!("Expected Prompt command"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["taxonomer", "schema", "--format", "json", "-v", "--no-color"]);
        assert!(matches!(cli.command, Command::Schema));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["taxonomer"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Json.into();
        assert_eq!(format, crate::config::OutputFormat::Json);
    }
}
