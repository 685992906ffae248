//! Currency-specific market conventions.
//!
//! Each supported currency fixes the holiday calendar, the money market
//! day count, the swap fixed leg day count and the spot lag.
//!
//! # Supported Currencies
//!
//! - EUR: TARGET2 calendar, ACT/360, 30E/360 swap fixed leg, T+2
//! - GBP: UK calendar, ACT/365F, T+0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ratehike_core::calendars::{BusinessDayConvention, Calendar};
use ratehike_core::daycounts::DayCountConvention;
use ratehike_core::Date;

use crate::error::{CurveError, CurveResult};

/// EUR market conventions.
pub mod eur {
    use super::*;
    use ratehike_core::calendars::Target2Calendar;

    /// Spot lag in days, each step rolled Following.
    pub const SPOT_DAYS: u32 = 2;

    /// Deposit, FRA, future and OIS day count.
    pub const MONEY_MARKET_DAY_COUNT: DayCountConvention = DayCountConvention::Act360;

    /// Swap fixed leg day count.
    pub const SWAP_FIXED_DAY_COUNT: DayCountConvention = DayCountConvention::Thirty360E;

    /// Returns the TARGET2 calendar.
    #[must_use]
    pub fn calendar() -> &'static Target2Calendar {
        Target2Calendar::global()
    }
}

/// GBP market conventions.
pub mod gbp {
    use super::*;
    use ratehike_core::calendars::UkCalendar;

    /// Spot lag in days (same-day settlement).
    pub const SPOT_DAYS: u32 = 0;

    /// Day count for every GBP instrument.
    pub const MONEY_MARKET_DAY_COUNT: DayCountConvention = DayCountConvention::Act365Fixed;

    /// Swap fixed leg day count.
    pub const SWAP_FIXED_DAY_COUNT: DayCountConvention = DayCountConvention::Act365Fixed;

    /// Returns the England and Wales calendar.
    #[must_use]
    pub fn calendar() -> &'static UkCalendar {
        UkCalendar::global()
    }
}

/// Currencies with built-in conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
    /// Pound sterling.
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// ISO code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Holiday calendar used for every date adjustment in this currency.
    #[must_use]
    pub fn calendar(self) -> &'static dyn Calendar {
        match self {
            Currency::Eur => eur::calendar(),
            Currency::Gbp => gbp::calendar(),
        }
    }

    /// Spot lag in days.
    #[must_use]
    pub fn spot_days(self) -> u32 {
        match self {
            Currency::Eur => eur::SPOT_DAYS,
            Currency::Gbp => gbp::SPOT_DAYS,
        }
    }

    /// Day count of deposits, FRAs, futures and OIS.
    #[must_use]
    pub fn money_market_day_count(self) -> DayCountConvention {
        match self {
            Currency::Eur => eur::MONEY_MARKET_DAY_COUNT,
            Currency::Gbp => gbp::MONEY_MARKET_DAY_COUNT,
        }
    }

    /// Day count of the swap fixed leg.
    #[must_use]
    pub fn swap_fixed_day_count(self) -> DayCountConvention {
        match self {
            Currency::Eur => eur::SWAP_FIXED_DAY_COUNT,
            Currency::Gbp => gbp::SWAP_FIXED_DAY_COUNT,
        }
    }

    /// Whether the swap fixed leg pays yearly rather than on the float
    /// schedule.
    #[must_use]
    pub fn yearly_fixed_leg(self) -> bool {
        matches!(self, Currency::Eur)
    }

    /// The spot date for trades on `today`.
    ///
    /// Each lag day adds one calendar day and rolls Following, so a
    /// holiday on the first step pushes the second.
    pub fn spot_date(self, today: Date) -> CurveResult<Date> {
        let calendar = self.calendar();
        let mut spot = today;
        for _ in 0..self.spot_days() {
            spot = calendar.adjust(spot.add_days(1), BusinessDayConvention::Following)?;
        }
        Ok(spot)
    }

    /// The next business day after `today` (Following).
    pub fn tomorrow(self, today: Date) -> CurveResult<Date> {
        Ok(self
            .calendar()
            .adjust(today.add_days(1), BusinessDayConvention::Following)?)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(CurveError::invalid_settings(format!(
                "unsupported currency '{other}' (expected EUR or GBP)"
            ))),
        }
    }
}
