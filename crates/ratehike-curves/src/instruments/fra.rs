//! FRA and future dates and fixing.

use ratehike_core::{Date, Period};

use super::{MarketInstrument, Terms};
use crate::curve::IrCurve;
use crate::error::CurveResult;

/// Start and maturity of a forward instrument: `base + start` and
/// `base + (start + maturity)`, both rolled from `base`.
pub(super) fn dates(terms: &Terms, base: Date, start: Period) -> CurveResult<(Date, Date)> {
    let end = start.checked_add(&terms.maturity)?;
    Ok((terms.roll(base, start)?, terms.roll(base, end)?))
}

/// Simple forward rate from `start` to maturity.
pub(super) fn fixing(instrument: &MarketInstrument, start: Date, curve: &IrCurve<'_>) -> f64 {
    let end = instrument.maturity_date();
    let dfs = curve.discount_factors_at(&[start, end]);
    let tau = instrument.day_count().year_fraction_f64(start, end);
    (dfs[0] / dfs[1] - 1.0) / tau
}
