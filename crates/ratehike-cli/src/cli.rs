//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BootstrapArgs, SettingsArgs};

/// RateHike - piecewise discount curve bootstrapping
#[derive(Parser)]
#[command(name = "ratehike")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log calibration sweeps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap a curve from an instrument file
    Bootstrap(BootstrapArgs),

    /// Print or check curve settings files
    Settings(SettingsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
