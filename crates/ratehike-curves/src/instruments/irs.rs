//! Interest rate swap fixing.
//!
//! Floating cash flows are forecast off the curve being built and
//! discounted off its discount curve:
//!
//! ```text
//!        Σₖ (f(tₖ₋₁)/f(tₖ) - 1) · D(tₖ)
//! r = ─────────────────────────────────
//!           Σⱼ D(sⱼ) · τ(sⱼ₋₁, sⱼ)
//! ```
//!
//! with `tₖ` the floating and `sⱼ` the fixed payment dates, both starting
//! from spot.

use ratehike_core::Date;

use super::MarketInstrument;
use crate::curve::IrCurve;

pub(super) fn fixing(
    instrument: &MarketInstrument,
    fixed_schedule: &[Date],
    float_schedule: &[Date],
    curve: &IrCurve<'_>,
) -> f64 {
    let spot = instrument.spot_date();
    let float_dates: Vec<Date> = std::iter::once(spot).chain(float_schedule.iter().copied()).collect();
    let fixed_dates: Vec<Date> = std::iter::once(spot).chain(fixed_schedule.iter().copied()).collect();

    let forecast = curve.discount_factors_at(&float_dates);
    let discount = curve.discount_curve();
    let discount_fixed = discount.discount_factors_at(fixed_schedule);
    let discount_float = discount.discount_factors_at(float_schedule);

    let accruals = instrument.day_count().accrual_fractions(&fixed_dates);
    let annuity: f64 = discount_fixed.iter().zip(&accruals).map(|(d, yf)| d * yf).sum();

    let floating: f64 = forecast
        .windows(2)
        .zip(&discount_float)
        .map(|(f, d)| (f[0] / f[1] - 1.0) * d)
        .sum();

    floating / annuity
}
