//! Curve settings and calibration parameters.
//!
//! Settings are plain serde structs. Files are TOML:
//!
//! ```toml
//! currency = "EUR"
//! today_date = "2023-07-06"
//! interpolation_method = "bessel"
//! interpolation_data_type = "zero"
//! spline_correction = "natural"
//!
//! [parameters]
//! spline_max_sweeps = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use ratehike_core::Date;

use crate::anchoring::ReAnchoring;
use crate::conventions::Currency;
use crate::data_type::DataType;
use crate::error::{CurveError, CurveResult};
use crate::instrument_set::SyntheticInstruments;
use crate::interpolation::{InterpolationMethod, SplineCorrection};

// =============================================================================
// BOOTSTRAP PARAMETERS
// =============================================================================

/// Numerical parameters of the calibration loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Absolute tolerance of the root search on a pillar discount factor.
    #[serde(default = "default_root_find_tol")]
    pub root_find_tol: f64,

    /// Relative half-width of the root search bracket around the guess.
    #[serde(default = "default_root_find_interval_radius")]
    pub root_find_interval_radius: f64,

    /// Sweep-to-sweep discount factor change that counts as converged.
    #[serde(default = "default_spline_df_convergence_tol")]
    pub spline_df_convergence_tol: f64,

    /// Maximum number of sweeps for non-local interpolation.
    #[serde(default = "default_spline_max_sweeps")]
    pub spline_max_sweeps: u32,
}

fn default_root_find_tol() -> f64 {
    1e-12
}

fn default_root_find_interval_radius() -> f64 {
    0.1
}

fn default_spline_df_convergence_tol() -> f64 {
    1e-12
}

fn default_spline_max_sweeps() -> u32 {
    10
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            root_find_tol: default_root_find_tol(),
            root_find_interval_radius: default_root_find_interval_radius(),
            spline_df_convergence_tol: default_spline_df_convergence_tol(),
            spline_max_sweeps: default_spline_max_sweeps(),
        }
    }
}

impl BootstrapConfig {
    /// Builder method to set the sweep limit.
    #[must_use]
    pub fn with_max_sweeps(mut self, sweeps: u32) -> Self {
        self.spline_max_sweeps = sweeps;
        self
    }

    /// Builder method to set the root search tolerance.
    #[must_use]
    pub fn with_root_find_tol(mut self, tol: f64) -> Self {
        self.root_find_tol = tol;
        self
    }

    /// Checks every parameter, reporting all violations at once.
    pub fn validate(&self) -> CurveResult<()> {
        let mut errors = Vec::new();

        if self.root_find_tol.is_nan() || self.root_find_tol <= 0.0 {
            errors.push(format!("root_find_tol must be positive, got {}", self.root_find_tol));
        }
        let radius = self.root_find_interval_radius;
        if radius.is_nan() || radius <= 0.0 || radius >= 1.0 {
            errors.push(format!(
                "root_find_interval_radius must lie in (0, 1), got {}",
                self.root_find_interval_radius
            ));
        }
        if self.spline_df_convergence_tol.is_nan() || self.spline_df_convergence_tol <= 0.0 {
            errors.push(format!(
                "spline_df_convergence_tol must be positive, got {}",
                self.spline_df_convergence_tol
            ));
        }
        if self.spline_max_sweeps == 0 {
            errors.push("spline_max_sweeps must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CurveError::invalid_settings(errors.join("; ")))
        }
    }
}

// =============================================================================
// CURVE SETTINGS
// =============================================================================

/// Everything a curve and its instruments need to know up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSettings {
    /// Currency, which fixes calendar, day counts and spot lag.
    pub currency: Currency,

    /// Valuation date.
    pub today_date: Date,

    /// Curve origin; the currency spot date when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_date: Option<Date>,

    /// Interpolation scheme.
    #[serde(default)]
    pub interpolation_method: InterpolationMethod,

    /// Quantity stored at the pillars.
    #[serde(default)]
    pub interpolation_data_type: DataType,

    /// Origin shift applied after calibration.
    #[serde(default)]
    pub re_anchoring: ReAnchoring,

    /// End condition for cubic interpolation.
    #[serde(default)]
    pub spline_correction: SplineCorrection,

    /// Short-end synthetic instruments added to instrument sets.
    #[serde(default)]
    pub synthetic_instruments: SyntheticInstruments,

    /// Calibration parameters.
    #[serde(default)]
    pub parameters: BootstrapConfig,
}

impl CurveSettings {
    /// Creates settings with default methods for a currency and date.
    #[must_use]
    pub fn new(currency: Currency, today_date: Date) -> Self {
        Self {
            currency,
            today_date,
            spot_date: None,
            interpolation_method: InterpolationMethod::default(),
            interpolation_data_type: DataType::default(),
            re_anchoring: ReAnchoring::default(),
            spline_correction: SplineCorrection::default(),
            synthetic_instruments: SyntheticInstruments::default(),
            parameters: BootstrapConfig::default(),
        }
    }

    /// Builder method to set the interpolation scheme and data type.
    #[must_use]
    pub fn with_interpolation(mut self, method: InterpolationMethod, data_type: DataType) -> Self {
        self.interpolation_method = method;
        self.interpolation_data_type = data_type;
        self
    }

    /// Builder method to set the spline end condition.
    #[must_use]
    pub fn with_spline_correction(mut self, correction: SplineCorrection) -> Self {
        self.spline_correction = correction;
        self
    }

    /// Builder method to set the re-anchoring mode.
    #[must_use]
    pub fn with_re_anchoring(mut self, re_anchoring: ReAnchoring) -> Self {
        self.re_anchoring = re_anchoring;
        self
    }

    /// Builder method to request synthetic instruments.
    #[must_use]
    pub fn with_synthetic_instruments(mut self, synthetics: SyntheticInstruments) -> Self {
        self.synthetic_instruments = synthetics;
        self
    }

    /// Builder method to pin the curve origin.
    #[must_use]
    pub fn with_spot_date(mut self, spot_date: Date) -> Self {
        self.spot_date = Some(spot_date);
        self
    }

    /// Builder method to replace the calibration parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: BootstrapConfig) -> Self {
        self.parameters = parameters;
        self
    }

    /// Curve origin: the explicit spot date or the currency spot date.
    pub fn resolved_spot_date(&self) -> CurveResult<Date> {
        match self.spot_date {
            Some(spot) => Ok(spot),
            None => self.currency.spot_date(self.today_date),
        }
    }

    /// Checks cross-field consistency and the calibration parameters.
    pub fn validate(&self) -> CurveResult<()> {
        if let Some(spot) = self.spot_date {
            if spot < self.today_date {
                return Err(CurveError::invalid_settings(format!(
                    "spot_date {spot} precedes today_date {}",
                    self.today_date
                )));
            }
        }
        self.parameters.validate()
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> CurveResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CurveResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
