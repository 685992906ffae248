//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::CoreResult;
use crate::types::{Date, TimeUnit};

/// Business day adjustment convention.
///
/// Determines how dates falling on non-business days are moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment.
    Unadjusted,

    /// Move to the next business day.
    #[default]
    Following,

    /// Move to the next business day unless it crosses into the next month,
    /// in which case move to the previous business day.
    ModifiedFollowing,

    /// Move to the previous business day.
    Preceding,
}

impl BusinessDayConvention {
    /// Market convention for a tenor unit: Following for day and week
    /// tenors, Modified Following for month and year tenors.
    #[must_use]
    pub fn for_unit(unit: TimeUnit) -> Self {
        if unit.is_monthly() {
            BusinessDayConvention::ModifiedFollowing
        } else {
            BusinessDayConvention::Following
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to a business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if calendar.is_business_day(date) {
        return Ok(date);
    }

    match convention {
        BusinessDayConvention::Unadjusted => Ok(date),

        BusinessDayConvention::Following => Ok(following(date, calendar)),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() != date.month() {
                // Crossed month boundary, go preceding instead
                Ok(preceding(date, calendar))
            } else {
                Ok(adjusted)
            }
        }

        BusinessDayConvention::Preceding => Ok(preceding(date, calendar)),
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_following() {
        let cal = WeekendCalendar;

        // Saturday should roll to Monday
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Following, &cal).unwrap();

        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_preceding() {
        let cal = WeekendCalendar;

        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Preceding, &cal).unwrap();

        assert_eq!(adjusted, Date::from_ymd(2025, 1, 3).unwrap());
    }

    #[test]
    fn test_modified_following_month_end() {
        let cal = WeekendCalendar;

        // Saturday May 31 2025: Following crosses into June, so roll back to Friday
        let saturday = Date::from_ymd(2025, 5, 31).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::ModifiedFollowing, &cal).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 5, 30).unwrap());

        // Sunday Jan 5 rolls forward within the month
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let adjusted = adjust(sunday, BusinessDayConvention::ModifiedFollowing, &cal).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_unadjusted_keeps_weekend() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Unadjusted, &cal).unwrap(),
            saturday
        );
    }

    #[test]
    fn test_for_unit() {
        assert_eq!(
            BusinessDayConvention::for_unit(TimeUnit::Weeks),
            BusinessDayConvention::Following
        );
        assert_eq!(
            BusinessDayConvention::for_unit(TimeUnit::Years),
            BusinessDayConvention::ModifiedFollowing
        );
    }
}
