//! Rolling dates forward by a period.
//!
//! A roll produces `base + k·period` for `k = 1..=length`, each computed
//! from the base date rather than from the previous result, then applies
//! the roll rule and the business day convention.

use serde::{Deserialize, Serialize};

use super::{BusinessDayConvention, Calendar};
use crate::error::CoreResult;
use crate::types::{Date, Period, TimeUnit};

/// How month-based periods place the rolled date within the target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RollRule {
    /// Same day of month as the base date (clamped to month end).
    #[default]
    Standard,
    /// Last calendar day of the target month.
    EndOfMonth,
    /// Third Wednesday of the target month (IMM dates).
    ThirdWednesday,
}

impl RollRule {
    fn place(self, base: Date, period: Period, k: i32) -> CoreResult<Date> {
        let months = match period.unit {
            TimeUnit::Days => return Ok(base.add_days(i64::from(period.number * k))),
            TimeUnit::Weeks => return Ok(base.add_days(i64::from(7 * period.number * k))),
            TimeUnit::Months => period.number * k,
            TimeUnit::Years => 12 * period.number * k,
        };
        let rolled = base.add_months(months)?;

        match self {
            RollRule::Standard => Ok(rolled),
            RollRule::EndOfMonth => Ok(rolled.end_of_month()),
            RollRule::ThirdWednesday => {
                let day21 = Date::from_ymd(rolled.year(), rolled.month(), 21)?;
                let back = (day21.weekday().num_days_from_monday() + 7 - 2) % 7;
                Ok(day21.add_days(-i64::from(back)))
            }
        }
    }
}

/// Rolls `base` forward `length` times by `period`, adjusting each date.
pub fn roll_dates<C: Calendar + ?Sized>(
    calendar: &C,
    base: Date,
    period: Period,
    length: usize,
    rule: RollRule,
    convention: BusinessDayConvention,
) -> CoreResult<Vec<Date>> {
    (1..=length as i32)
        .map(|k| {
            let date = rule.place(base, period, k)?;
            calendar.adjust(date, convention)
        })
        .collect()
}

/// Rolls `base` forward once by `period`.
pub fn roll_date<C: Calendar + ?Sized>(
    calendar: &C,
    base: Date,
    period: Period,
    rule: RollRule,
    convention: BusinessDayConvention,
) -> CoreResult<Date> {
    let date = rule.place(base, period, 1)?;
    calendar.adjust(date, convention)
}
