//! Tenors expressed as a count of calendar units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Calendar unit of a [`Period`].
///
/// Serialized with the two-letter codes used in instrument files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days (`DY`).
    #[serde(rename = "DY")]
    Days,
    /// Calendar weeks (`WK`).
    #[serde(rename = "WK")]
    Weeks,
    /// Calendar months (`MO`).
    #[serde(rename = "MO")]
    Months,
    /// Calendar years (`YR`).
    #[serde(rename = "YR")]
    Years,
}

impl TimeUnit {
    /// Two-letter code of the unit.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TimeUnit::Days => "DY",
            TimeUnit::Weeks => "WK",
            TimeUnit::Months => "MO",
            TimeUnit::Years => "YR",
        }
    }

    /// Returns true for month-based units (MO, YR).
    #[must_use]
    pub fn is_monthly(&self) -> bool {
        matches!(self, TimeUnit::Months | TimeUnit::Years)
    }
}

impl FromStr for TimeUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DY" | "D" => Ok(TimeUnit::Days),
            "WK" | "W" => Ok(TimeUnit::Weeks),
            "MO" | "M" => Ok(TimeUnit::Months),
            "YR" | "Y" => Ok(TimeUnit::Years),
            other => Err(CoreError::invalid_period(format!("unknown time unit '{other}'"))),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A tenor such as `6MO` or `10YR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Number of units.
    pub number: i32,
    /// The unit.
    pub unit: TimeUnit,
}

impl Period {
    /// Creates a period.
    #[must_use]
    pub const fn new(number: i32, unit: TimeUnit) -> Self {
        Self { number, unit }
    }

    /// `n` calendar days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` calendar weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// `n` calendar months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` calendar years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Length in months for MO/YR periods, `None` for day-based periods.
    #[must_use]
    pub fn in_months(&self) -> Option<i32> {
        match self.unit {
            TimeUnit::Months => Some(self.number),
            TimeUnit::Years => Some(self.number * 12),
            TimeUnit::Days | TimeUnit::Weeks => None,
        }
    }

    /// Sums two periods of the same unit.
    pub fn checked_add(&self, other: &Period) -> CoreResult<Self> {
        if self.unit != other.unit {
            return Err(CoreError::invalid_period(format!(
                "cannot add {other} to {self}: units differ"
            )));
        }
        Ok(Self::new(self.number + other.number, self.unit))
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoreError::invalid_period(format!("missing unit in '{s}'")))?;
        let (number, unit) = s.split_at(split);
        let number = number
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_period(format!("missing count in '{s}'")))?;
        Ok(Self::new(number, unit.parse()?))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit)
    }
}
