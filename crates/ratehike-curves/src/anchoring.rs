//! Moving a calibrated curve's time origin from spot to today.
//!
//! The two-step modes insert pillars at today and tomorrow in front of
//! the original pillars. ONTN prices the gap with an overnight deposit,
//! so that today's curve discounts through the overnight and tom-next
//! periods; the fixed two-step mode assumes zero rates over the gap.

use serde::{Deserialize, Serialize};
use std::fmt;

use ratehike_core::{Date, Period};

use crate::curve::{CurveQuery, IrCurve, CURVE_DAY_COUNT};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{InstrumentType, MarketInstrument};

/// Re-anchoring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReAnchoring {
    /// Keep the spot origin.
    #[default]
    #[serde(rename = "no")]
    No,
    /// Relabel the origin as today, pillar data untouched.
    #[serde(rename = "date")]
    Date,
    /// Prepend today and tomorrow with unit discount factors.
    #[serde(rename = "11")]
    TwoStep,
    /// Prepend today and tomorrow priced off an overnight deposit.
    #[serde(rename = "ONTN")]
    Ontn,
}

impl ReAnchoring {
    /// Setting name of the mode.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ReAnchoring::No => "no",
            ReAnchoring::Date => "date",
            ReAnchoring::TwoStep => "11",
            ReAnchoring::Ontn => "ONTN",
        }
    }

    /// Whether the mode needs an overnight deposit.
    #[must_use]
    pub fn needs_overnight_deposit(self) -> bool {
        matches!(self, ReAnchoring::Ontn)
    }
}

impl fmt::Display for ReAnchoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'d> IrCurve<'d> {
    /// Applies the configured re-anchoring once, after calibration.
    ///
    /// `overnight` is the spot-next deposit required by ONTN and ignored
    /// by the other modes.
    pub fn re_anchor(&mut self, overnight: Option<&MarketInstrument>) -> CurveResult<()> {
        if let Some(orig) = self.spot_date_orig {
            return Err(CurveError::re_anchor_precondition(format!(
                "curve {} is already anchored (original spot {orig})",
                self.name()
            )));
        }

        let mode = self.settings().re_anchoring;
        match mode {
            ReAnchoring::No => {
                self.spot_date_orig = Some(self.spot_date);
            }
            ReAnchoring::Date => {
                self.spot_date_orig = Some(self.spot_date);
                self.spot_date = self.today_date();
            }
            ReAnchoring::TwoStep => self.prepend_today_tomorrow(1.0, 1.0)?,
            ReAnchoring::Ontn => {
                let deposit = overnight.ok_or(CurveError::MissingReAnchorInstrument)?;
                let (df_on, df_tn) = self.overnight_discount_factors(deposit)?;
                self.prepend_today_tomorrow(df_on, df_tn)?;
            }
        }

        tracing::debug!(
            curve = %self.name(),
            mode = %mode,
            spot = %self.spot_date,
            "Curve re-anchored"
        );
        Ok(())
    }

    /// Overnight and tom-next discount factors implied by a spot-next
    /// deposit quote.
    fn overnight_discount_factors(&self, deposit: &MarketInstrument) -> CurveResult<(f64, f64)> {
        if deposit.instrument_type() != InstrumentType::Deposit {
            return Err(CurveError::re_anchor_instrument(format!(
                "{deposit} is not a deposit"
            )));
        }
        let next_day = deposit.roll_from_spot(Period::days(1))?;
        if deposit.maturity_date() != next_day {
            return Err(CurveError::re_anchor_instrument(format!(
                "{deposit} does not mature on the business day {next_day} after its spot date {}",
                deposit.spot_date()
            )));
        }

        let today = self.today_date();
        let tomorrow = self.currency().tomorrow(today)?;
        let accruals = deposit
            .day_count()
            .accrual_fractions(&[today, tomorrow, self.spot_date]);
        let quote = deposit.quote();
        Ok((
            1.0 / (quote * accruals[0] + 1.0),
            1.0 / (quote * accruals[1] + 1.0),
        ))
    }

    /// Rebuilds the pillars as `[today, tomorrow, original pillars...]`
    /// with discount factors `[1, df_on, original · df_on · df_tn]`.
    fn prepend_today_tomorrow(&mut self, df_on: f64, df_tn: f64) -> CurveResult<()> {
        let today = self.today_date();
        let tomorrow = self.currency().tomorrow(today)?;
        let spot = self.spot_date;
        if spot <= tomorrow {
            return Err(CurveError::re_anchor_precondition(format!(
                "spot date {spot} must lie after tomorrow {tomorrow}"
            )));
        }

        let dfs_orig = self.discount_factors(CurveQuery::AllPillars)?;
        if dfs_orig.is_empty() {
            return Err(CurveError::re_anchor_precondition(format!(
                "curve {} has no calibrated pillars",
                self.name()
            )));
        }
        let dates_orig: Vec<Date> = self.dates(&self.pillar_times()[..dfs_orig.len()]);

        let from_today = |date: Date| CURVE_DAY_COUNT.year_fraction_f64(today, date);
        let times: Vec<f64> = [today, tomorrow]
            .into_iter()
            .chain(dates_orig)
            .map(from_today)
            .collect();
        let dfs: Vec<f64> = [1.0, df_on]
            .into_iter()
            .chain(dfs_orig.iter().map(|df| df * df_on * df_tn))
            .collect();

        self.set_times(&times)?;
        self.update_all_discount_factors(&dfs)?;
        self.spot_date_orig = Some(spot);
        self.spot_date = today;
        Ok(())
    }
}
