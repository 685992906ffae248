//! Bootstrap command implementation.
//!
//! Calibrates a curve from an instrument file, optionally discounted off a
//! second curve calibrated first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ratehike_core::Date;
use ratehike_curves::bootstrap::{BootstrapInfo, BootstrapStatus};
use ratehike_curves::instrument_set::InstrumentSet;
use ratehike_curves::metrics::{RoundtripCheck, RoundtripReport};
use ratehike_curves::{CurveQuery, CurveSettings, IrCurve};

use crate::cli::OutputFormat;
use crate::commands::load_settings;
use crate::output::{print_csv, print_header, print_json, print_table, print_warning, KeyValue};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Curve settings file (TOML)
    #[arg(short, long)]
    pub settings: PathBuf,

    /// Instrument file (CSV)
    #[arg(short, long)]
    pub instruments: PathBuf,

    /// Settings of the discount curve (TOML)
    #[arg(long, requires = "discount_instruments")]
    pub discount_settings: Option<PathBuf>,

    /// Instruments of the discount curve (CSV)
    #[arg(long, requires = "discount_settings")]
    pub discount_instruments: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD), overriding the settings files
    #[arg(short, long)]
    pub today: Option<Date>,

    /// Curve name
    #[arg(short, long, default_value = "CURVE")]
    pub name: String,

    /// Apply the settings' re-anchoring after calibration
    #[arg(long)]
    pub re_anchor: bool,

    /// Show round trip errors of the market instruments
    #[arg(long)]
    pub roundtrip: bool,
}

/// One pillar of a calibrated curve.
#[derive(Debug, Clone, Serialize, Tabled)]
struct PillarRow {
    #[tabled(rename = "Pillar")]
    pillar: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    #[tabled(display_with = "display_6")]
    time: f64,
    #[tabled(rename = "Discount Factor")]
    #[tabled(display_with = "display_10")]
    discount_factor: f64,
    #[tabled(rename = "Zero Rate (%)")]
    #[tabled(display_with = "display_percent")]
    zero_rate: f64,
    #[tabled(rename = "Inst. Forward (%)")]
    #[tabled(display_with = "display_percent")]
    forward: f64,
}

/// Round trip error of one instrument.
#[derive(Debug, Clone, Serialize, Tabled)]
struct RoundtripRow {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Quote (%)")]
    #[tabled(display_with = "display_percent")]
    quote: f64,
    #[tabled(rename = "Fixing (%)")]
    #[tabled(display_with = "display_percent")]
    fixing: f64,
    #[tabled(rename = "Error (bp)")]
    #[tabled(display_with = "display_bp")]
    error: f64,
}

impl From<&RoundtripCheck> for RoundtripRow {
    fn from(check: &RoundtripCheck) -> Self {
        Self {
            instrument: check.instrument.clone(),
            quote: check.quote,
            fixing: check.fixing,
            error: check.error,
        }
    }
}

/// JSON document of a bootstrap run.
#[derive(Debug, Serialize)]
struct BootstrapOutput<'a> {
    curve: &'a str,
    today_date: Date,
    spot_date: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    spot_date_orig: Option<Date>,
    settings: &'a CurveSettings,
    bootstrap: BootstrapInfo,
    pillars: &'a [PillarRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    roundtrip: Option<&'a RoundtripReport>,
}

fn display_6(value: &f64) -> String {
    format!("{value:.6}")
}

fn display_10(value: &f64) -> String {
    format!("{value:.10}")
}

fn display_percent(value: &f64) -> String {
    format!("{:.6}", value * 100.0)
}

fn display_bp(value: &f64) -> String {
    format!("{:.2e}", value * 10_000.0)
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, format: OutputFormat) -> Result<()> {
    let discount = match (&args.discount_settings, &args.discount_instruments) {
        (Some(settings_path), Some(instruments_path)) => {
            let settings = load_settings(settings_path, args.today)?;
            let set = InstrumentSet::from_csv(&settings, instruments_path, None)
                .with_context(|| format!("Failed to read {}", instruments_path.display()))?;
            let mut curve = IrCurve::new("DISCOUNT", settings)?;
            curve.bootstrap(set.instruments())?;
            Some(curve)
        }
        _ => None,
    };

    let settings = load_settings(&args.settings, args.today)?;
    let set = InstrumentSet::from_csv(&settings, &args.instruments, discount.as_ref())
        .with_context(|| format!("Failed to read {}", args.instruments.display()))?;

    let mut curve = IrCurve::new(args.name.as_str(), settings.clone())?;
    if let Some(discount) = &discount {
        curve.set_discount_curve(discount);
    }
    let info = curve.bootstrap(set.instruments())?;
    if info.status == BootstrapStatus::Exhausted {
        print_warning(&format!(
            "Calibration stopped after {} sweeps (convergence {:.2e})",
            info.iterations, info.discount_factor_convergence
        ));
    }

    // Round trip errors are measured before re-anchoring moves the origin
    let report = args
        .roundtrip
        .then(|| RoundtripReport::new(&curve, set.market_instruments()));

    if args.re_anchor {
        let overnight = set.market_instruments().first().copied();
        curve.re_anchor(overnight)?;
    }

    let rows = pillar_rows(&curve)?;

    match format {
        OutputFormat::Table => {
            let summary = [
                KeyValue::new("Curve", curve.name()),
                KeyValue::new("Currency", curve.currency()),
                KeyValue::new("Today", curve.today_date()),
                KeyValue::new("Spot", curve.spot_date()),
                KeyValue::new("Interpolation", settings.interpolation_method),
                KeyValue::new("Data type", settings.interpolation_data_type),
                KeyValue::new("Synthetic instruments", set.n_synthetic()),
                KeyValue::new("Sweeps", info.iterations),
                KeyValue::new("Function evaluations", info.function_evaluations),
                KeyValue::new("Status", info.status),
            ];
            print_header("Bootstrapped Curve");
            print_table(&summary)?;
            println!();
            print_table(&rows)?;

            if let Some(report) = &report {
                print_header("Round Trip");
                println!(
                    "Max error: {:.2e}  RMS error: {:.2e}",
                    report.max_error(),
                    report.rms_error()
                );
                let checks: Vec<RoundtripRow> = report.checks().iter().map(Into::into).collect();
                print_table(&checks)?;
            }
        }
        OutputFormat::Json => {
            let output = BootstrapOutput {
                curve: curve.name(),
                today_date: curve.today_date(),
                spot_date: curve.spot_date(),
                spot_date_orig: curve.spot_date_orig(),
                settings: &settings,
                bootstrap: info,
                pillars: &rows,
                roundtrip: report.as_ref(),
            };
            print_json(&output)?;
        }
        OutputFormat::Csv => print_csv(&rows)?,
    }

    Ok(())
}

fn pillar_rows(curve: &IrCurve<'_>) -> Result<Vec<PillarRow>> {
    let dfs = curve.discount_factors(CurveQuery::AllPillars)?;
    let zeros = curve.zero_rates(CurveQuery::AllPillars)?;
    let forwards = curve.instantaneous_forwards(CurveQuery::AllPillars)?;
    let dates = curve.pillar_dates();

    Ok(dfs
        .iter()
        .enumerate()
        .map(|(pillar, &discount_factor)| PillarRow {
            pillar,
            date: dates[pillar].to_string(),
            time: curve.pillar_time(pillar),
            discount_factor,
            zero_rate: zeros[pillar],
            forward: forwards[pillar],
        })
        .collect())
}
