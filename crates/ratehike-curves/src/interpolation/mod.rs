//! Piecewise-polynomial coefficient engine.
//!
//! Each populated pillar `i` carries a local polynomial on `[tᵢ, tᵢ₊₁)`:
//!
//! ```text
//! p(t) = vᵢ + bᵢ·x + cᵢ·x² + dᵢ·x³,   x = t - tᵢ
//! ```
//!
//! Linear interpolation stores `(v, b)`; Bessel (Hermite cubic) stores
//! `(v, b, c, d)`. Pillars are populated as a prefix of the time grid and
//! every update recomputes only the coefficients that depend on the
//! updated value. A scoped update leaves the table identical to a full
//! recomputation over the same values.

mod bessel;
mod correction;
mod linear;

pub use correction::SplineCorrection;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CurveError, CurveResult};
use crate::settings::BootstrapConfig;

/// Interpolation scheme for the raw pillar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Piecewise linear, flat after the last pillar.
    #[default]
    #[serde(rename = "linear")]
    Linear,
    /// Hermite cubic with Bessel tangents.
    #[serde(rename = "bessel")]
    Bessel,
}

impl InterpolationMethod {
    /// Number of polynomial coefficients stored per pillar.
    #[must_use]
    pub fn n_coefficients(self) -> usize {
        match self {
            InterpolationMethod::Linear => 2,
            InterpolationMethod::Bessel => 4,
        }
    }

    /// Returns true if a pillar's coefficients depend on later pillars,
    /// so that calibration needs repeated sweeps.
    #[must_use]
    pub fn is_nonlocal(self) -> bool {
        matches!(self, InterpolationMethod::Bessel)
    }

    /// Setting name of the method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Bessel => "bessel",
        }
    }

    fn recompute(self, table: &mut PillarTable, updated: Option<usize>, correction: SplineCorrection) {
        match self {
            InterpolationMethod::Linear => linear::recompute(table, updated),
            InterpolationMethod::Bessel => bessel::recompute(table, updated, correction),
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pillar times and coefficient rows.
///
/// `quadratic` and `cubic` are empty for linear interpolation.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PillarTable {
    pub(crate) times: Vec<f64>,
    pub(crate) values: Vec<f64>,
    pub(crate) slopes: Vec<f64>,
    pub(crate) quadratic: Vec<f64>,
    pub(crate) cubic: Vec<f64>,
    pub(crate) n_set: usize,
}

impl PillarTable {
    /// Slope of the chord from pillar `i` to `i + 1`.
    pub(crate) fn secant(&self, i: usize) -> f64 {
        (self.values[i + 1] - self.values[i]) / (self.times[i + 1] - self.times[i])
    }

    fn quadratic(&self, i: usize) -> f64 {
        self.quadratic.get(i).copied().unwrap_or(0.0)
    }

    fn cubic(&self, i: usize) -> f64 {
        self.cubic.get(i).copied().unwrap_or(0.0)
    }
}

/// Coefficient table with incremental recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientEngine {
    method: InterpolationMethod,
    correction: SplineCorrection,
    max_sweeps: u32,
    table: PillarTable,
}

impl CoefficientEngine {
    /// Creates an engine with no pillars.
    #[must_use]
    pub fn new(
        method: InterpolationMethod,
        correction: SplineCorrection,
        config: &BootstrapConfig,
    ) -> Self {
        let max_sweeps = if method.is_nonlocal() {
            config.spline_max_sweeps
        } else {
            1
        };
        Self {
            method,
            correction,
            max_sweeps,
            table: PillarTable::default(),
        }
    }

    /// The interpolation method.
    #[must_use]
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// The boundary correction applied at the last pillar.
    #[must_use]
    pub fn correction(&self) -> SplineCorrection {
        self.correction
    }

    /// Number of polynomial coefficients per pillar.
    #[must_use]
    pub fn n_coefficients(&self) -> usize {
        self.method.n_coefficients()
    }

    /// Maximum number of calibration sweeps the method needs.
    #[must_use]
    pub fn max_sweeps(&self) -> u32 {
        self.max_sweeps
    }

    /// Pillar times, origin included.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.table.times
    }

    /// Total number of pillars.
    #[must_use]
    pub fn n_pillars(&self) -> usize {
        self.table.times.len()
    }

    /// Number of populated pillars (a prefix of the grid).
    #[must_use]
    pub fn n_pillars_set(&self) -> usize {
        self.table.n_set
    }

    /// Installs the pillar times, prepending the origin if absent, and
    /// clears all coefficients.
    pub fn set_times(&mut self, times: &[f64]) -> CurveResult<()> {
        let mut grid = Vec::with_capacity(times.len() + 1);
        if times.first() != Some(&0.0) {
            grid.push(0.0);
        }
        grid.extend_from_slice(times);

        if let Some(index) = grid.windows(2).position(|w| w[0].is_nan() || w[1].is_nan() || w[1] <= w[0]) {
            return Err(CurveError::NonMonotonicTimes {
                index: index + 1,
                prev: grid[index],
                current: grid[index + 1],
            });
        }

        let n = grid.len();
        let higher = if self.method.is_nonlocal() { n } else { 0 };
        self.table = PillarTable {
            times: grid,
            values: vec![0.0; n],
            slopes: vec![0.0; n],
            quadratic: vec![0.0; higher],
            cubic: vec![0.0; higher],
            n_set: 0,
        };
        Ok(())
    }

    /// Stores `value` at `pillar` and recomputes the affected coefficients.
    pub fn update_pillar(&mut self, value: f64, pillar: usize) -> CurveResult<()> {
        if pillar >= self.n_pillars() {
            return Err(CurveError::PillarOutOfRange {
                pillar,
                n_pillars: self.n_pillars(),
            });
        }
        self.store(value, pillar);
        Ok(())
    }

    /// `update_pillar` for an index already known to be on the grid.
    pub(crate) fn store(&mut self, value: f64, pillar: usize) {
        // Skipping past the populated prefix invalidates the old boundary
        let scope = (pillar <= self.table.n_set).then_some(pillar);
        self.table.values[pillar] = value;
        self.table.n_set = self.table.n_set.max(pillar + 1);
        self.method.recompute(&mut self.table, scope, self.correction);
    }

    /// Stores the leading `values` and recomputes the whole table once.
    pub fn update_all_pillars(&mut self, values: &[f64]) -> CurveResult<()> {
        if values.len() > self.n_pillars() {
            return Err(CurveError::PillarOutOfRange {
                pillar: values.len() - 1,
                n_pillars: self.n_pillars(),
            });
        }
        self.table.values[..values.len()].copy_from_slice(values);
        self.table.n_set = self.table.n_set.max(values.len());
        self.method.recompute(&mut self.table, None, self.correction);
        Ok(())
    }

    /// Coefficient of order `order` (0 = value, 1 = slope, ...) at `pillar`.
    #[must_use]
    pub fn coefficient(&self, order: usize, pillar: usize) -> f64 {
        match order {
            0 => self.table.values[pillar],
            1 => self.table.slopes[pillar],
            2 => self.table.quadratic(pillar),
            3 => self.table.cubic(pillar),
            _ => 0.0,
        }
    }

    /// Raw value (or first derivative) at pillars, at times, or at all
    /// populated pillars, in that order of precedence.
    pub fn get_data(
        &self,
        times: Option<&[f64]>,
        pillars: Option<&[usize]>,
        derivative: bool,
    ) -> CurveResult<Vec<f64>> {
        let order = usize::from(derivative);
        if let Some(pillars) = pillars {
            return pillars
                .iter()
                .map(|&pillar| {
                    if pillar < self.table.n_set {
                        Ok(self.coefficient(order, pillar))
                    } else {
                        Err(CurveError::PillarNotSet {
                            pillar,
                            n_set: self.table.n_set,
                        })
                    }
                })
                .collect();
        }
        if let Some(times) = times {
            return Ok(times.iter().map(|&t| self.evaluate(t, derivative)).collect());
        }
        Ok((0..self.table.n_set)
            .map(|pillar| self.coefficient(order, pillar))
            .collect())
    }

    /// Raw value (or first derivative) at time `t`.
    ///
    /// Flat before the origin and from the last populated pillar on.
    #[must_use]
    pub fn evaluate(&self, t: f64, derivative: bool) -> f64 {
        let table = &self.table;
        let n = table.n_set;
        if n == 0 {
            return 0.0;
        }

        let last = n - 1;
        if t < table.times[0] || t >= table.times[last] {
            if derivative {
                return 0.0;
            }
            return if t < table.times[0] {
                table.values[0]
            } else {
                table.values[last]
            };
        }

        let i = table.times[..n].partition_point(|&ti| ti <= t) - 1;
        let x = t - table.times[i];
        let (b, c, d) = (table.slopes[i], table.quadratic(i), table.cubic(i));
        if derivative {
            b + x * (2.0 * c + 3.0 * d * x)
        } else {
            table.values[i] + x * (b + x * (c + x * d))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn engine(method: InterpolationMethod, correction: SplineCorrection) -> CoefficientEngine {
        CoefficientEngine::new(method, correction, &BootstrapConfig::default())
    }

    fn filled(
        method: InterpolationMethod,
        correction: SplineCorrection,
        times: &[f64],
        values: &[f64],
    ) -> CoefficientEngine {
        let mut engine = engine(method, correction);
        engine.set_times(times).unwrap();
        for (i, v) in values.iter().enumerate() {
            engine.update_pillar(*v, i).unwrap();
        }
        engine
    }

    const TIMES: [f64; 8] = [0.0, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 10.0];
    const VALUES: [f64; 8] = [0.0, -0.008, -0.017, -0.035, -0.068, -0.1, -0.165, -0.32];

    #[test]
    fn test_set_times_prepends_origin() {
        let mut engine = engine(InterpolationMethod::Linear, SplineCorrection::None);
        engine.set_times(&[0.5, 1.0]).unwrap();
        assert_eq!(engine.times(), &[0.0, 0.5, 1.0]);
        assert_eq!(engine.n_pillars_set(), 0);

        engine.set_times(&[0.0, 2.0]).unwrap();
        assert_eq!(engine.times(), &[0.0, 2.0]);
    }

    #[test]
    fn test_set_times_rejects_unsorted() {
        let mut engine = engine(InterpolationMethod::Linear, SplineCorrection::None);
        let err = engine.set_times(&[1.0, 0.5]).unwrap_err();
        assert!(matches!(err, CurveError::NonMonotonicTimes { index: 2, .. }));
    }

    #[test]
    fn test_n_coefficients_and_sweeps() {
        let linear = engine(InterpolationMethod::Linear, SplineCorrection::None);
        assert_eq!(linear.n_coefficients(), 2);
        assert_eq!(linear.max_sweeps(), 1);

        let bessel = engine(InterpolationMethod::Bessel, SplineCorrection::None);
        assert_eq!(bessel.n_coefficients(), 4);
        assert_eq!(bessel.max_sweeps(), 10);
    }

    #[test]
    fn test_linear_continuity() {
        let engine = filled(InterpolationMethod::Linear, SplineCorrection::None, &TIMES, &VALUES);
        for i in 0..TIMES.len() - 1 {
            let dt = TIMES[i + 1] - TIMES[i];
            assert_relative_eq!(
                engine.coefficient(0, i) + engine.coefficient(1, i) * dt,
                engine.coefficient(0, i + 1),
                epsilon = 1e-15
            );
        }
        assert_eq!(engine.coefficient(1, TIMES.len() - 1), 0.0);
    }

    #[test]
    fn test_bessel_hermite_continuity() {
        let engine = filled(InterpolationMethod::Bessel, SplineCorrection::None, &TIMES, &VALUES);
        for i in 0..TIMES.len() - 1 {
            let dt = TIMES[i + 1] - TIMES[i];
            let (v, b, c, d) = (
                engine.coefficient(0, i),
                engine.coefficient(1, i),
                engine.coefficient(2, i),
                engine.coefficient(3, i),
            );
            assert_relative_eq!(
                v + b * dt + c * dt * dt + d * dt * dt * dt,
                engine.coefficient(0, i + 1),
                epsilon = 1e-14
            );
            assert_relative_eq!(
                b + 2.0 * c * dt + 3.0 * d * dt * dt,
                engine.coefficient(1, i + 1),
                epsilon = 1e-13
            );
        }
        let last = TIMES.len() - 1;
        assert_eq!(engine.coefficient(2, last), 0.0);
        assert_eq!(engine.coefficient(3, last), 0.0);
    }

    #[test]
    fn test_partial_update_matches_full_recompute() {
        for method in [InterpolationMethod::Linear, InterpolationMethod::Bessel] {
            for correction in [
                SplineCorrection::None,
                SplineCorrection::Linear,
                SplineCorrection::Natural,
            ] {
                let mut incremental = filled(method, correction, &TIMES, &VALUES);
                // Second sweep: perturb every pillar in turn
                for (i, v) in VALUES.iter().enumerate().skip(1) {
                    incremental.update_pillar(v * 1.01, i).unwrap();
                }

                let mut full = engine(method, correction);
                full.set_times(&TIMES).unwrap();
                let bumped: Vec<f64> = VALUES
                    .iter()
                    .enumerate()
                    .map(|(i, v)| if i == 0 { *v } else { v * 1.01 })
                    .collect();
                full.update_all_pillars(&bumped).unwrap();

                for order in 0..4 {
                    for pillar in 0..TIMES.len() {
                        assert_relative_eq!(
                            incremental.coefficient(order, pillar),
                            full.coefficient(order, pillar),
                            epsilon = 1e-13
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_get_data_precedence() {
        let engine = filled(InterpolationMethod::Linear, SplineCorrection::None, &TIMES, &VALUES);

        let by_pillar = engine.get_data(Some(&[0.3]), Some(&[2, 3]), false).unwrap();
        assert_eq!(by_pillar, vec![VALUES[2], VALUES[3]]);

        let by_time = engine.get_data(Some(&[0.5, 0.75]), None, false).unwrap();
        assert_relative_eq!(by_time[0], VALUES[2]);
        assert_relative_eq!(by_time[1], 0.5 * (VALUES[2] + VALUES[3]), epsilon = 1e-15);

        let all = engine.get_data(None, None, false).unwrap();
        assert_eq!(all, VALUES.to_vec());

        let slopes = engine.get_data(None, Some(&[7]), true).unwrap();
        assert_eq!(slopes, vec![0.0]);
    }

    #[test]
    fn test_get_data_unset_pillar() {
        let mut engine = engine(InterpolationMethod::Linear, SplineCorrection::None);
        engine.set_times(&TIMES).unwrap();
        engine.update_pillar(0.0, 0).unwrap();
        engine.update_pillar(-0.01, 1).unwrap();
        assert!(matches!(
            engine.get_data(None, Some(&[3]), false),
            Err(CurveError::PillarNotSet { pillar: 3, n_set: 2 })
        ));
        assert_eq!(engine.get_data(None, None, false).unwrap().len(), 2);
    }

    #[test]
    fn test_update_off_grid() {
        let mut engine = engine(InterpolationMethod::Bessel, SplineCorrection::None);
        engine.set_times(&TIMES).unwrap();
        let n = engine.n_pillars();
        engine.update_pillar(0.0, 0).unwrap();

        assert!(matches!(
            engine.update_pillar(-0.01, n),
            Err(CurveError::PillarOutOfRange { pillar, n_pillars }) if pillar == n && n_pillars == n
        ));
        assert!(matches!(
            engine.update_all_pillars(&vec![0.0; n + 1]),
            Err(CurveError::PillarOutOfRange { .. })
        ));
        assert_eq!(engine.n_pillars_set(), 1);
    }

    #[test]
    fn test_flat_extrapolation() {
        let engine = filled(InterpolationMethod::Bessel, SplineCorrection::None, &TIMES, &VALUES);
        assert_eq!(engine.evaluate(10.0, false), VALUES[7]);
        assert_eq!(engine.evaluate(30.0, false), VALUES[7]);
        assert_eq!(engine.evaluate(30.0, true), 0.0);
        assert_eq!(engine.evaluate(-1.0, false), VALUES[0]);

        // Partially populated: flat from the last populated pillar
        let mut partial = engine.clone();
        partial.set_times(&TIMES).unwrap();
        partial.update_pillar(0.0, 0).unwrap();
        partial.update_pillar(-0.008, 1).unwrap();
        assert_eq!(partial.evaluate(5.0, false), -0.008);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let engine = filled(InterpolationMethod::Bessel, SplineCorrection::Natural, &TIMES, &VALUES);
        let h = 1e-6;
        for t in [0.1, 0.4, 0.8, 1.5, 2.5, 4.0, 7.5] {
            let fd = (engine.evaluate(t + h, false) - engine.evaluate(t - h, false)) / (2.0 * h);
            assert_relative_eq!(engine.evaluate(t, true), fd, epsilon = 1e-7);
        }
    }

    proptest! {
        #[test]
        fn prop_bessel_interpolates_pillars(
            values in proptest::collection::vec(-1.0f64..1.0, 8)
        ) {
            let engine = filled(InterpolationMethod::Bessel, SplineCorrection::None, &TIMES, &values);
            for (i, t) in TIMES.iter().enumerate() {
                prop_assert!((engine.evaluate(*t, false) - values[i]).abs() < 1e-12);
            }
        }
    }
}
