//! Command-line interface for khet3d.

use clap::Parser;
use std::path::PathBuf;

/// Khet 3D - configuration validator
#[derive(Parser, Debug)]
#[command(name = "khet3d")]
#[command(about = "Validate and canonicalize Khet 3D board configurations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(required_unless_present = "check_move")]
    pub config: Option<PathBuf>,

    /// TOML file with output settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory for artifacts (overrides settings and KHET_OUTPUT_DIR)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Check whether a move command is syntactically valid instead
    #[arg(
        long,
        value_name = "MOVE",
        conflicts_with = "config",
        allow_hyphen_values = true
    )]
    pub check_move: Option<String>,
}
