//! Calibration loop.
//!
//! Instrument `k` calibrates pillar `k + 1`; pillar 0 is the origin with a
//! discount factor of one. Synthetic instruments write their discount
//! factor directly. Market instruments are solved with Brent's method on
//! a bracket around a guess, each trial committed into the curve before
//! the instrument is priced against it.
//!
//! Linear interpolation is local, so one sweep suffices. Bessel tangents
//! read the next pillar, so earlier pillars move once later ones are
//! solved and the loop sweeps until the discount factors settle.

use serde::{Deserialize, Serialize};
use std::fmt;

use ratehike_math::solvers::{brent, SolverConfig};

use crate::curve::{CurveQuery, IrCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::Instrument;

/// Terminal state of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootstrapStatus {
    /// Discount factors settled within tolerance (always for linear).
    Converged,
    /// The sweep limit was reached first.
    Exhausted,
}

impl fmt::Display for BootstrapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapStatus::Converged => write!(f, "converged"),
            BootstrapStatus::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Diagnostics of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapInfo {
    /// Number of sweeps performed.
    pub iterations: u32,
    /// Largest discount factor change in the last sweep.
    pub discount_factor_convergence: f64,
    /// Objective evaluations over all root searches.
    pub function_evaluations: u32,
    /// Terminal state.
    pub status: BootstrapStatus,
}

impl<'d> IrCurve<'d> {
    /// Calibrates the curve so that every market instrument reprices to
    /// its quote.
    ///
    /// Replaces any previous pillar data. Non-convergence of the sweeps is
    /// reported in the returned [`BootstrapInfo`], not as an error.
    pub fn bootstrap(&mut self, instruments: &[Instrument]) -> CurveResult<BootstrapInfo> {
        if instruments.is_empty() {
            return Err(CurveError::EmptyInstrumentSet);
        }

        let times: Vec<f64> = instruments
            .iter()
            .map(|inst| self.year_fraction(inst.maturity_date()))
            .collect();
        if let Some(k) = times.iter().position(|&t| t <= 0.0) {
            return Err(CurveError::invalid_instrument(format!(
                "instrument {k} matures on or before the curve spot date {}",
                self.spot_date()
            )));
        }
        self.set_times(&times)?;
        self.update_discount_factor(1.0, 0)?;

        let params = self.settings().parameters;
        let solver = SolverConfig::default().with_tolerance(params.root_find_tol);
        let radius = params.root_find_interval_radius;
        let max_sweeps = self.engine.max_sweeps();

        let mut iteration: u32 = 1;
        let mut previous = vec![0.0; self.n_pillars()];
        let mut convergence = 1.0;
        let mut function_evaluations = 0;

        while iteration <= max_sweeps && convergence > params.spline_df_convergence_tol {
            for (k, instrument) in instruments.iter().enumerate() {
                let pillar = k + 1;
                match instrument {
                    Instrument::Synthetic(synthetic) => {
                        self.update_discount_factor(synthetic.discount_factor(), pillar)?;
                    }
                    Instrument::Market(market) => {
                        let guess_pillar = if iteration == 1 { k } else { pillar };
                        let guess = self.discount_factors(CurveQuery::Pillars(&[guess_pillar]))?[0];
                        let quote = market.quote();

                        let result = brent(
                            |df| {
                                self.commit_discount_factor(df, pillar);
                                quote - market.fixing(self)
                            },
                            guess * (1.0 - radius),
                            guess * (1.0 + radius),
                            &solver,
                        )
                        .map_err(|source| CurveError::RootBracketing {
                            instrument: market.to_string(),
                            pillar,
                            source,
                        })?;

                        self.update_discount_factor(result.root, pillar)?;
                        function_evaluations += result.function_evaluations;
                    }
                }
            }

            let current = self.discount_factors(CurveQuery::AllPillars)?;
            convergence = previous
                .iter()
                .zip(&current)
                .map(|(p, c)| (p - c).abs())
                .fold(0.0, f64::max);
            previous = current;

            tracing::debug!(
                curve = %self.name(),
                sweep = iteration,
                convergence,
                function_evaluations,
                "Bootstrap sweep completed"
            );
            iteration += 1;
        }

        let status = if convergence <= params.spline_df_convergence_tol
            || !self.engine.method().is_nonlocal()
        {
            BootstrapStatus::Converged
        } else {
            BootstrapStatus::Exhausted
        };
        let info = BootstrapInfo {
            iterations: iteration - 1,
            discount_factor_convergence: convergence,
            function_evaluations,
            status,
        };

        match status {
            BootstrapStatus::Converged => tracing::info!(
                curve = %self.name(),
                pillars = self.n_pillars(),
                sweeps = info.iterations,
                function_evaluations,
                "Curve bootstrapped"
            ),
            BootstrapStatus::Exhausted => tracing::warn!(
                curve = %self.name(),
                sweeps = info.iterations,
                convergence,
                tolerance = params.spline_df_convergence_tol,
                "Bootstrap stopped at the sweep limit before converging"
            ),
        }

        self.bootstrap_info = Some(info);
        Ok(info)
    }
}
