//! Day count conventions for accrual and curve time calculations.
//!
//! A day count turns a pair of dates into a year fraction. The curve layer
//! measures pillar times with ACT/365F from the curve spot date, while
//! instruments accrue with the convention of their market.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360, EUR money market
//! - [`Act365Fixed`]: Actual/365 Fixed, GBP money market and curve time
//! - [`Thirty360E`]: 30E/360, EUR swap fixed legs
//!
//! # Usage
//!
//! ```rust
//! use ratehike_core::daycounts::{Act360, DayCount};
//! use ratehike_core::types::Date;
//! use rust_decimal::Decimal;
//!
//! let start = Date::from_ymd(2023, 7, 10).unwrap();
//! let end = Date::from_ymd(2023, 7, 11).unwrap();
//! assert_eq!(Act360.day_count(start, end), 1);
//! assert_eq!(Act360.year_fraction(start, end), Decimal::ONE / Decimal::from(360));
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::Thirty360E;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Date;

/// Trait for day count conventions.
pub trait DayCount: Send + Sync {
    /// Returns the name of the convention.
    fn name(&self) -> &'static str;

    /// Year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates under the convention's day rules.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    #[serde(rename = "ACT/360")]
    Act360,
    /// Actual/365 Fixed.
    #[serde(rename = "ACT/365F")]
    Act365Fixed,
    /// 30E/360 (Eurobond basis).
    #[serde(rename = "30E/360")]
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Returns the name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Year fraction as `Decimal`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end),
        }
    }

    /// Year fraction converted to `f64` for curve arithmetic.
    #[must_use]
    pub fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }

    /// Year fractions of consecutive date pairs: `[yf(d0, d1), yf(d1, d2), ...]`.
    #[must_use]
    pub fn accrual_fractions(&self, dates: &[Date]) -> Vec<f64> {
        dates
            .windows(2)
            .map(|pair| self.year_fraction_f64(pair[0], pair[1]))
            .collect()
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
