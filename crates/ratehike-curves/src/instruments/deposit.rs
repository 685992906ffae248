//! Deposit fixing.

use super::MarketInstrument;
use crate::curve::IrCurve;

/// Simple rate from spot to maturity:
///
/// ```text
/// r = (DF(spot) / DF(maturity) - 1) / τ
/// ```
pub(super) fn fixing(instrument: &MarketInstrument, curve: &IrCurve<'_>) -> f64 {
    let start = instrument.spot_date();
    let end = instrument.maturity_date();
    let dfs = curve.discount_factors_at(&[start, end]);
    let tau = instrument.day_count().year_fraction_f64(start, end);
    (dfs[0] / dfs[1] - 1.0) / tau
}
