//! Overnight index swap fixing.

use ratehike_core::Date;

use super::MarketInstrument;
use crate::curve::IrCurve;

/// Par rate of an OIS on the curve itself:
///
/// ```text
/// r = (DF(spot) - DF(tₙ)) / Σᵢ DF(tᵢ) · τ(tᵢ₋₁, tᵢ)
/// ```
pub(super) fn fixing(
    instrument: &MarketInstrument,
    payment_schedule: &[Date],
    curve: &IrCurve<'_>,
) -> f64 {
    let mut dates = Vec::with_capacity(payment_schedule.len() + 1);
    dates.push(instrument.spot_date());
    dates.extend_from_slice(payment_schedule);

    let dfs = curve.discount_factors_at(&dates);
    let accruals = instrument.day_count().accrual_fractions(&dates);
    let annuity: f64 = dfs[1..].iter().zip(&accruals).map(|(df, yf)| df * yf).sum();

    (dfs[0] - dfs[dfs.len() - 1]) / annuity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::Currency;
    use crate::settings::CurveSettings;
    use approx::assert_relative_eq;
    use ratehike_core::Period;

    #[test]
    fn test_single_payment_equals_deposit() {
        let settings = CurveSettings::new(Currency::Eur, Date::from_ymd(2023, 7, 6).unwrap());
        let ois = MarketInstrument::ois(&settings, 0.0, Period::months(6)).unwrap();
        let depo = MarketInstrument::deposit(&settings, 0.0, Period::months(6)).unwrap();

        let mut curve = IrCurve::new("ESTR", settings).unwrap();
        curve.set_times(&[1.0]).unwrap();
        curve.update_all_discount_factors(&[1.0, 0.965]).unwrap();

        assert_eq!(ois.maturity_date(), depo.maturity_date());
        assert_relative_eq!(ois.fixing(&curve), depo.fixing(&curve), epsilon = 1e-14);
    }
}
