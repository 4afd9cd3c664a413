//! Khet 3D - configuration validator CLI
//!
//! Writes one artifact per run; the exit code is 0 for a validated
//! configuration and 1 for any diagnostic.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use khet3d::{MoveCommand, Settings, process};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match (cli.check_move, cli.config) {
        (Some(command), _) => run_check_move(&command),
        (None, Some(config)) => run_validate(config, cli.settings, cli.output_dir, cli.json),
        (None, None) => anyhow::bail!("a configuration file path is required"),
    }
}

/// Validate one configuration file
#[instrument(skip_all, fields(config = %config.display()))]
fn run_validate(
    config: PathBuf,
    settings_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    json: bool,
) -> Result<ExitCode> {
    let settings = load_settings(settings_path, output_dir)?;
    debug!(?settings, "Resolved settings");

    let report = process(&config, &settings)?;
    info!(output = %report.output.display(), "Run finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(if report.outcome.is_validated() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Settings precedence: file (or defaults), then environment, then flags.
fn load_settings(settings_path: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<Settings> {
    let settings = match settings_path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let settings = settings.with_env_overrides();
    Ok(match output_dir {
        Some(dir) => settings.with_output_dir(dir),
        None => settings,
    })
}

/// Report whether a move string parses
#[instrument]
fn run_check_move(command: &str) -> Result<ExitCode> {
    match command.parse::<MoveCommand>() {
        Ok(parsed) => {
            println!("valid: {:?}", parsed);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
