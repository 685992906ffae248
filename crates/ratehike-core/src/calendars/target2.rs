//! TARGET2 calendar for Eurozone payments.

use chrono::NaiveDate;
use std::sync::OnceLock;

use super::holidays::{easter_offset, HolidaySet};
use super::Calendar;
use crate::types::Date;

/// Static TARGET2 calendar instance.
static TARGET2_CALENDAR: OnceLock<Target2Calendar> = OnceLock::new();

/// TARGET2 holiday calendar for Eurozone markets.
///
/// ## Holidays
///
/// - New Year's Day (January 1)
/// - Good Friday
/// - Easter Monday
/// - Labour Day (May 1)
/// - Christmas Day (December 25)
/// - Boxing Day (December 26)
///
/// Holidays falling on a weekend are not observed on another day.
#[derive(Debug, Clone)]
pub struct Target2Calendar {
    holidays: HolidaySet,
}

impl Target2Calendar {
    /// Create a new TARGET2 calendar.
    pub fn new() -> Self {
        Self {
            holidays: HolidaySet::generate(target2_holidays),
        }
    }

    /// Get the global TARGET2 calendar instance.
    pub fn global() -> &'static Target2Calendar {
        TARGET2_CALENDAR.get_or_init(Target2Calendar::new)
    }
}

impl Default for Target2Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for Target2Calendar {
    fn name(&self) -> &'static str {
        "TARGET2"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.holidays.is_business_day(date.as_naive_date())
    }
}

fn target2_holidays(year: i32) -> Vec<NaiveDate> {
    [(1, 1), (5, 1), (12, 25), (12, 26)]
        .into_iter()
        .filter_map(|(month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .chain(easter_offset(year, -2))
        .chain(easter_offset(year, 1))
        .collect()
}
