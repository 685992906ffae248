//! RateHike CLI - bootstrap discount curves from instrument files.
//!
//! # Usage
//!
//! ```bash
//! # Print a settings template
//! ratehike settings sample --currency EUR --today 2023-07-06 > estr.toml
//!
//! # Bootstrap an OIS curve
//! ratehike bootstrap --settings estr.toml --instruments ois.csv --roundtrip
//!
//! # Bootstrap an IBOR curve discounted off the OIS curve
//! ratehike bootstrap --settings euribor.toml --instruments ibor.csv \
//!     --discount-settings estr.toml --discount-instruments ois.csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so that stdout stays parseable
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, format)?,
        Commands::Settings(args) => commands::settings::execute(args, format)?,
    }

    Ok(())
}
