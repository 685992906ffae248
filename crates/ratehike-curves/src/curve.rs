//! Interest rate curve built on the coefficient engine.
//!
//! An [`IrCurve`] owns its pillar table and reads it through its
//! [`DataType`]. Pillar times are ACT/365F year fractions from the curve's
//! spot date. A curve may borrow a separate discount curve, used by
//! instruments whose cash flows are discounted off another curve (IRS).

use ratehike_core::daycounts::DayCountConvention;
use ratehike_core::Date;

use crate::bootstrap::BootstrapInfo;
use crate::conventions::Currency;
use crate::data_type::DataType;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::CoefficientEngine;
use crate::settings::CurveSettings;

/// Day count of curve pillar times.
pub const CURVE_DAY_COUNT: DayCountConvention = DayCountConvention::Act365Fixed;

/// Selects the points at which a curve is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveQuery<'q> {
    /// Every populated pillar.
    AllPillars,
    /// Specific pillar indices.
    Pillars(&'q [usize]),
    /// Year fractions from the spot date.
    Times(&'q [f64]),
    /// Calendar dates.
    Dates(&'q [Date]),
}

/// A bootstrapped interest rate curve.
///
/// The lifetime `'d` is that of the borrowed discount curve, if any.
#[derive(Debug, Clone)]
pub struct IrCurve<'d> {
    name: String,
    settings: CurveSettings,
    data_type: DataType,
    pub(crate) engine: CoefficientEngine,
    pub(crate) spot_date: Date,
    pub(crate) spot_date_orig: Option<Date>,
    discount_curve: Option<&'d IrCurve<'d>>,
    pub(crate) bootstrap_info: Option<BootstrapInfo>,
}

impl<'d> IrCurve<'d> {
    /// Creates an empty curve from settings.
    pub fn new(name: impl Into<String>, settings: CurveSettings) -> CurveResult<Self> {
        settings.validate()?;
        let spot_date = settings.resolved_spot_date()?;
        let engine = CoefficientEngine::new(
            settings.interpolation_method,
            settings.spline_correction,
            &settings.parameters,
        );
        Ok(Self {
            name: name.into(),
            data_type: settings.interpolation_data_type,
            settings,
            engine,
            spot_date,
            spot_date_orig: None,
            discount_curve: None,
            bootstrap_info: None,
        })
    }

    /// Builder method to discount cash flows off another curve.
    #[must_use]
    pub fn with_discount_curve(mut self, curve: &'d IrCurve<'d>) -> Self {
        self.discount_curve = Some(curve);
        self
    }

    /// Sets the curve used for discounting.
    pub fn set_discount_curve(&mut self, curve: &'d IrCurve<'d>) {
        self.discount_curve = Some(curve);
    }

    /// The discounting curve: the borrowed one, or this curve itself.
    #[must_use]
    pub fn discount_curve(&self) -> &IrCurve<'d> {
        self.discount_curve.unwrap_or(self)
    }

    /// Curve name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings the curve was built from.
    #[must_use]
    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    /// Currency of the curve.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.settings.currency
    }

    /// Stored data type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Valuation date.
    #[must_use]
    pub fn today_date(&self) -> Date {
        self.settings.today_date
    }

    /// Current time origin.
    #[must_use]
    pub fn spot_date(&self) -> Date {
        self.spot_date
    }

    /// Origin before re-anchoring; `None` until the curve is re-anchored.
    #[must_use]
    pub fn spot_date_orig(&self) -> Option<Date> {
        self.spot_date_orig
    }

    /// Diagnostics of the last calibration.
    #[must_use]
    pub fn bootstrap_info(&self) -> Option<&BootstrapInfo> {
        self.bootstrap_info.as_ref()
    }

    /// The coefficient engine.
    #[must_use]
    pub fn engine(&self) -> &CoefficientEngine {
        &self.engine
    }

    /// Total number of pillars, origin included.
    #[must_use]
    pub fn n_pillars(&self) -> usize {
        self.engine.n_pillars()
    }

    /// Time of pillar `pillar`.
    #[must_use]
    pub fn pillar_time(&self, pillar: usize) -> f64 {
        self.engine.times()[pillar]
    }

    /// Pillar times, origin included.
    #[must_use]
    pub fn pillar_times(&self) -> &[f64] {
        self.engine.times()
    }

    /// Year fraction from the spot date to `date`.
    #[must_use]
    pub fn year_fraction(&self, date: Date) -> f64 {
        CURVE_DAY_COUNT.year_fraction_f64(self.spot_date, date)
    }

    /// Dates for year fractions, `spot + round(t·365)` days.
    #[must_use]
    pub fn dates(&self, times: &[f64]) -> Vec<Date> {
        times
            .iter()
            .map(|t| self.spot_date.add_days((t * 365.0).round() as i64))
            .collect()
    }

    /// Dates of all pillars.
    #[must_use]
    pub fn pillar_dates(&self) -> Vec<Date> {
        self.dates(self.engine.times())
    }

    /// Installs pillar times, clearing all pillar values.
    pub fn set_times(&mut self, times: &[f64]) -> CurveResult<()> {
        self.engine.set_times(times)
    }

    /// Stores a discount factor at `pillar`.
    pub fn update_discount_factor(&mut self, discount_factor: f64, pillar: usize) -> CurveResult<()> {
        if pillar >= self.n_pillars() {
            return Err(CurveError::PillarOutOfRange {
                pillar,
                n_pillars: self.n_pillars(),
            });
        }
        self.commit_discount_factor(discount_factor, pillar);
        Ok(())
    }

    /// Stores a discount factor at a pillar the caller has checked against
    /// the grid.
    pub(crate) fn commit_discount_factor(&mut self, discount_factor: f64, pillar: usize) {
        let raw = self
            .data_type
            .from_discount_factor(discount_factor, self.pillar_time(pillar));
        self.engine.store(raw, pillar);
    }

    /// Stores leading discount factors with one full recomputation.
    pub fn update_all_discount_factors(&mut self, discount_factors: &[f64]) -> CurveResult<()> {
        if discount_factors.len() > self.n_pillars() {
            return Err(CurveError::PillarOutOfRange {
                pillar: discount_factors.len() - 1,
                n_pillars: self.n_pillars(),
            });
        }
        let raw: Vec<f64> = discount_factors
            .iter()
            .zip(self.engine.times())
            .map(|(&df, &t)| self.data_type.from_discount_factor(df, t))
            .collect();
        self.engine.update_all_pillars(&raw)
    }

    fn raw_data(&self, query: CurveQuery<'_>, derivative: bool) -> CurveResult<(Vec<f64>, Vec<f64>)> {
        match query {
            CurveQuery::AllPillars => {
                let data = self.engine.get_data(None, None, derivative)?;
                let times = self.engine.times()[..data.len()].to_vec();
                Ok((data, times))
            }
            CurveQuery::Pillars(pillars) => {
                let data = self.engine.get_data(None, Some(pillars), derivative)?;
                let times = pillars.iter().map(|&p| self.pillar_time(p)).collect();
                Ok((data, times))
            }
            CurveQuery::Times(times) => {
                let data = self.engine.get_data(Some(times), None, derivative)?;
                Ok((data, times.to_vec()))
            }
            CurveQuery::Dates(dates) => {
                let times: Vec<f64> = dates.iter().map(|&d| self.year_fraction(d)).collect();
                let data = self.engine.get_data(Some(&times), None, derivative)?;
                Ok((data, times))
            }
        }
    }

    /// Discount factors at the queried points.
    pub fn discount_factors(&self, query: CurveQuery<'_>) -> CurveResult<Vec<f64>> {
        let (data, times) = self.raw_data(query, false)?;
        Ok(data
            .iter()
            .zip(&times)
            .map(|(&raw, &t)| self.data_type.discount_factor(raw, t))
            .collect())
    }

    /// Continuously compounded zero rates at the queried points.
    pub fn zero_rates(&self, query: CurveQuery<'_>) -> CurveResult<Vec<f64>> {
        let (data, times) = self.raw_data(query, false)?;
        Ok(data
            .iter()
            .zip(&times)
            .map(|(&raw, &t)| self.data_type.zero_rate(raw, t))
            .collect())
    }

    /// Instantaneous forward rates at the queried points.
    pub fn instantaneous_forwards(&self, query: CurveQuery<'_>) -> CurveResult<Vec<f64>> {
        let (data, times) = self.raw_data(query, false)?;
        let (slopes, _) = self.raw_data(query, true)?;
        Ok(data
            .iter()
            .zip(&slopes)
            .zip(&times)
            .map(|((&raw, &d_raw), &t)| self.data_type.instantaneous_forward(raw, d_raw, t))
            .collect())
    }

    /// Discount factors at dates, read straight off the interpolant.
    #[must_use]
    pub fn discount_factors_at(&self, dates: &[Date]) -> Vec<f64> {
        dates
            .iter()
            .map(|&date| {
                let t = self.year_fraction(date);
                self.data_type.discount_factor(self.engine.evaluate(t, false), t)
            })
            .collect()
    }
}
