//! Taxonomer CLI - Command-line interface for LLM content classification.

use clap::Parser;
use std::process::ExitCode;
use taxonomer_cli::commands;
use taxonomer_cli::{apply_overrides, load_config, log_level, Cli, Command, Formatter, Overrides};
use tracing_subscriber::EnvFilter;

/// Exit code when the backend could not produce a classification
const EXIT_UNAVAILABLE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format.map(Into::into).unwrap_or_default(), !cli.no_color);

    match run(cli, &formatter) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_UNAVAILABLE),
        Err(e) => {
            eprintln!("{}", formatter.error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, formatter: &Formatter) -> taxonomer_cli::Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let mut overrides = Overrides {
        enable: cli.enable,
        verbose: cli.verbose,
        ..Default::default()
    };
    if let Command::Classify(args) = &cli.command {
        overrides.host = args.host.clone();
        overrides.max_tokens = args.max_tokens;
        overrides.temperature = args.temperature;
    }
    let config = apply_overrides(config, overrides)?;

    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(config.verbose))),
        )
        .init();

    match cli.command {
        Command::Classify(args) => commands::execute_classify(&args, config, formatter),
        Command::Prompt(args) => commands::execute_prompt(&args, &config, formatter).map(|_| true),
        Command::Schema => commands::execute_schema(&config, formatter).map(|_| true),
        Command::Taxonomies => commands::execute_taxonomies(&config, formatter).map(|_| true),
    }
}
