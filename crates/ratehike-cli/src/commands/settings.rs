//! Settings command implementation.
//!
//! Prints settings templates and checks settings files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use ratehike_core::Date;
use ratehike_curves::conventions::Currency;
use ratehike_curves::{CurveSettings, DataType, InterpolationMethod};

use crate::cli::OutputFormat;
use crate::commands::{load_settings, local_today};
use crate::output::{print_json, print_output, print_success, KeyValue};

/// Arguments for the settings command.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print a settings file with every field spelled out
    Sample(SampleArgs),

    /// Load and validate a settings file
    Check(CheckArgs),
}

/// Arguments for the sample subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Currency (EUR or GBP)
    #[arg(short, long, default_value = "EUR")]
    pub currency: Currency,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub today: Option<Date>,

    /// Interpolation method
    #[arg(long, value_enum, default_value = "bessel")]
    pub method: MethodChoice,

    /// Interpolated quantity
    #[arg(long, value_enum, default_value = "logdf")]
    pub data_type: DataTypeChoice,
}

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Settings file (TOML)
    pub path: PathBuf,
}

/// Interpolation method choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodChoice {
    /// Piecewise linear
    Linear,
    /// Hermite cubic with Bessel tangents
    Bessel,
}

impl From<MethodChoice> for InterpolationMethod {
    fn from(choice: MethodChoice) -> Self {
        match choice {
            MethodChoice::Linear => InterpolationMethod::Linear,
            MethodChoice::Bessel => InterpolationMethod::Bessel,
        }
    }
}

/// Interpolated quantity choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataTypeChoice {
    /// Zero rates
    Zero,
    /// Discount factors
    Df,
    /// Log discount factors
    #[value(name = "logdf")]
    LogDf,
}

impl From<DataTypeChoice> for DataType {
    fn from(choice: DataTypeChoice) -> Self {
        match choice {
            DataTypeChoice::Zero => DataType::Zero,
            DataTypeChoice::Df => DataType::Df,
            DataTypeChoice::LogDf => DataType::LogDf,
        }
    }
}

/// Execute the settings command.
pub fn execute(args: SettingsArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        SettingsCommand::Sample(sample_args) => execute_sample(sample_args, format),
        SettingsCommand::Check(check_args) => execute_check(&check_args, format),
    }
}

fn execute_sample(args: SampleArgs, format: OutputFormat) -> Result<()> {
    let today = match args.today {
        Some(date) => date,
        None => local_today()?,
    };
    let settings = CurveSettings::new(args.currency, today)
        .with_interpolation(args.method.into(), args.data_type.into());

    match format {
        OutputFormat::Json => print_json(&settings)?,
        OutputFormat::Table | OutputFormat::Csv => print!("{}", toml::to_string_pretty(&settings)?),
    }
    Ok(())
}

fn execute_check(args: &CheckArgs, format: OutputFormat) -> Result<()> {
    let settings = load_settings(&args.path, None)?;
    let p = &settings.parameters;
    let rows = [
        KeyValue::new("currency", settings.currency),
        KeyValue::new("today_date", settings.today_date),
        KeyValue::new("spot_date", settings.resolved_spot_date()?),
        KeyValue::new("interpolation_method", settings.interpolation_method),
        KeyValue::new("interpolation_data_type", settings.interpolation_data_type),
        KeyValue::new("spline_correction", settings.spline_correction),
        KeyValue::new("re_anchoring", settings.re_anchoring),
        KeyValue::new("synthetic_instruments", settings.synthetic_instruments),
        KeyValue::new("root_find_tol", p.root_find_tol),
        KeyValue::new("root_find_interval_radius", p.root_find_interval_radius),
        KeyValue::new("spline_df_convergence_tol", p.spline_df_convergence_tol),
        KeyValue::new("spline_max_sweeps", p.spline_max_sweeps),
    ];

    if format == OutputFormat::Table {
        print_success(&format!("{} is valid", args.path.display()));
    }
    print_output(&rows, format)
}
