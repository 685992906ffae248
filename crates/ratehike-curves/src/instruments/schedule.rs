//! Payment schedules for swap legs.

use ratehike_core::{Date, Period, TimeUnit};

use super::Terms;
use crate::error::{CurveError, CurveResult};

/// Yearly payments from spot to maturity.
///
/// Tenors up to one year pay once at maturity. Longer month tenors pay a
/// front stub `maturity - 12` months after spot, then at maturity.
pub(super) fn yearly_schedule(terms: &Terms, maturity_date: Date) -> CurveResult<Vec<Date>> {
    let maturity = terms.maturity;
    match maturity.unit {
        TimeUnit::Days | TimeUnit::Weeks => Ok(vec![maturity_date]),
        TimeUnit::Months if maturity.number <= 12 => Ok(vec![maturity_date]),
        TimeUnit::Years if maturity.number == 1 => Ok(vec![maturity_date]),
        TimeUnit::Years => {
            terms.roll_n(terms.spot_date, Period::years(1), maturity.number as usize)
        }
        TimeUnit::Months => {
            let stub = terms.roll(terms.spot_date, Period::months(maturity.number - 12))?;
            Ok(vec![stub, maturity_date])
        }
    }
}

/// Floating leg payments every `tenor_months` from spot.
pub(super) fn tenor_schedule(terms: &Terms, tenor_months: u32) -> CurveResult<Vec<Date>> {
    let months = terms.maturity.in_months().ok_or_else(|| {
        CurveError::invalid_instrument(format!(
            "swap maturity {} must be in months or years",
            terms.maturity
        ))
    })?;
    let tenor = i32::try_from(tenor_months)
        .ok()
        .filter(|&t| t > 0 && t <= months)
        .ok_or_else(|| {
            CurveError::invalid_instrument(format!(
                "floating tenor of {tenor_months} months does not fit maturity {}",
                terms.maturity
            ))
        })?;

    terms.roll_n(
        terms.spot_date,
        Period::months(tenor),
        (months / tenor) as usize,
    )
}
