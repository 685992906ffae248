//! Calibration quality metrics.
//!
//! - [`roundtrip`]: how far each calibrated instrument reprices from its quote
//! - [`benchmark`]: differences between reference values and curve values
//!
//! [`RoundtripReport`] wraps the round trip errors with summary statistics
//! for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::{CurveQuery, IrCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{InstrumentType, MarketInstrument};

/// Fixing minus quote for each market instrument.
#[must_use]
pub fn roundtrip<'a, I>(curve: &IrCurve<'_>, instruments: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a MarketInstrument>,
{
    instruments
        .into_iter()
        .map(|inst| inst.fixing(curve) - inst.quote())
        .collect()
}

/// Curve quantity compared by [`benchmark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkKind {
    /// Continuously compounded zero rates.
    ZeroRates,
    /// Discount factors.
    DiscountFactors,
}

/// Reference value minus curve value at each pillar.
///
/// `pillars` defaults to every populated pillar after the origin and must
/// have the same length as `expected`. Missing reference values give
/// missing differences.
pub fn benchmark(
    curve: &IrCurve<'_>,
    expected: &[Option<f64>],
    kind: BenchmarkKind,
    pillars: Option<&[usize]>,
) -> CurveResult<Vec<Option<f64>>> {
    let default_pillars: Vec<usize>;
    let pillars = match pillars {
        Some(p) => p,
        None => {
            default_pillars = (1..curve.engine().n_pillars_set()).collect();
            &default_pillars
        }
    };

    if pillars.len() != expected.len() {
        return Err(CurveError::invalid_settings(format!(
            "{} reference values for {} pillars",
            expected.len(),
            pillars.len()
        )));
    }

    let query = CurveQuery::Pillars(pillars);
    let values = match kind {
        BenchmarkKind::ZeroRates => curve.zero_rates(query)?,
        BenchmarkKind::DiscountFactors => curve.discount_factors(query)?,
    };

    Ok(expected
        .iter()
        .zip(&values)
        .map(|(reference, value)| reference.map(|r| r - value))
        .collect())
}

/// Round trip result of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtripCheck {
    /// Instrument description, e.g. `ois 1YR (2024-07-10)`.
    pub instrument: String,
    /// Instrument type.
    pub instrument_type: InstrumentType,
    /// Market quote.
    pub quote: f64,
    /// Rate implied by the curve.
    pub fixing: f64,
    /// `fixing - quote`.
    pub error: f64,
}

impl fmt::Display for RoundtripCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | quote: {:.6} | fixing: {:.6} | error: {:.2e}",
            self.instrument, self.quote, self.fixing, self.error
        )
    }
}

/// Round trip results of a calibrated curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtripReport {
    checks: Vec<RoundtripCheck>,
    max_error: f64,
    rms_error: f64,
}

impl RoundtripReport {
    /// Reprices `instruments` against `curve`.
    pub fn new<'a, I>(curve: &IrCurve<'_>, instruments: I) -> Self
    where
        I: IntoIterator<Item = &'a MarketInstrument>,
    {
        let checks: Vec<RoundtripCheck> = instruments
            .into_iter()
            .map(|inst| {
                let fixing = inst.fixing(curve);
                RoundtripCheck {
                    instrument: inst.to_string(),
                    instrument_type: inst.instrument_type(),
                    quote: inst.quote(),
                    fixing,
                    error: fixing - inst.quote(),
                }
            })
            .collect();

        let max_error = checks.iter().map(|c| c.error.abs()).fold(0.0_f64, f64::max);
        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        Self {
            checks,
            max_error,
            rms_error,
        }
    }

    /// Individual checks, in instrument order.
    #[must_use]
    pub fn checks(&self) -> &[RoundtripCheck] {
        &self.checks
    }

    /// Largest absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Root mean square error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Whether every error is within `tolerance`.
    #[must_use]
    pub fn is_within(&self, tolerance: f64) -> bool {
        self.max_error <= tolerance
    }
}

impl fmt::Display for RoundtripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round trip: {} instruments", self.checks.len())?;
        writeln!(f, "Max error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS error: {:.2e}", self.rms_error)?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::Currency;
    use crate::instruments::Instrument;
    use crate::settings::CurveSettings;
    use approx::assert_relative_eq;
    use ratehike_core::{Date, Period};

    fn calibrated() -> (IrCurve<'static>, Vec<MarketInstrument>) {
        let settings = CurveSettings::new(Currency::Eur, Date::from_ymd(2023, 7, 6).unwrap());
        let market = vec![
            MarketInstrument::deposit(&settings, 0.034, Period::days(1)).unwrap(),
            MarketInstrument::ois(&settings, 0.036, Period::months(3)).unwrap(),
            MarketInstrument::ois(&settings, 0.037, Period::years(1)).unwrap(),
        ];
        let instruments: Vec<Instrument> = market.iter().cloned().map(Instrument::from).collect();
        let mut curve = IrCurve::new("ESTR", settings).unwrap();
        curve.bootstrap(&instruments).unwrap();
        (curve, market)
    }

    #[test]
    fn test_roundtrip_near_zero() {
        let (curve, market) = calibrated();
        let errors = roundtrip(&curve, &market);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.abs() < 1e-9));

        let report = RoundtripReport::new(&curve, &market);
        assert!(report.is_within(1e-9));
        assert_eq!(report.checks()[2].instrument_type, InstrumentType::Ois);
        assert!(report.to_string().contains("ois 1YR"));
    }

    #[test]
    fn test_benchmark_against_self() {
        let (curve, _) = calibrated();
        let zeros = curve.zero_rates(CurveQuery::Pillars(&[1, 2, 3])).unwrap();
        let expected = vec![Some(zeros[0] + 1e-4), None, Some(zeros[2])];

        let diffs = benchmark(&curve, &expected, BenchmarkKind::ZeroRates, None).unwrap();
        assert_relative_eq!(diffs[0].unwrap(), 1e-4, epsilon = 1e-12);
        assert_eq!(diffs[1], None);
        assert_relative_eq!(diffs[2].unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_benchmark_selected_pillars() {
        let (curve, _) = calibrated();
        let dfs = curve.discount_factors(CurveQuery::Pillars(&[3])).unwrap();
        let diffs =
            benchmark(&curve, &[Some(dfs[0])], BenchmarkKind::DiscountFactors, Some(&[3])).unwrap();
        assert_relative_eq!(diffs[0].unwrap(), 0.0, epsilon = 1e-15);

        assert!(matches!(
            benchmark(&curve, &[Some(1.0)], BenchmarkKind::DiscountFactors, None),
            Err(CurveError::InvalidSettings { .. })
        ));
    }
}
