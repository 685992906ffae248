//! CLI command implementations.

pub mod bootstrap;
pub mod settings;

pub use bootstrap::BootstrapArgs;
pub use settings::SettingsArgs;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use ratehike_core::Date;
use ratehike_curves::CurveSettings;

/// Today's local date.
pub fn local_today() -> Result<Date> {
    let today = chrono::Local::now().date_naive();
    Date::from_ymd(today.year(), today.month(), today.day())
        .map_err(|e| anyhow::anyhow!("Invalid today date: {e}"))
}

/// Loads a settings file, optionally overriding its valuation date.
pub fn load_settings(path: &Path, today: Option<Date>) -> Result<CurveSettings> {
    let mut settings = CurveSettings::from_file(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    if let Some(today) = today {
        settings.today_date = today;
        settings.spot_date = None;
    }
    settings.validate()?;
    Ok(settings)
}
