//! UK (England & Wales) bank holidays calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::OnceLock;

use super::holidays::{
    easter_offset, last_weekday_of_month, nth_weekday_of_month, substitute_monday, HolidaySet,
};
use super::Calendar;
use crate::types::Date;

/// Static UK calendar instance.
static UK_CALENDAR: OnceLock<UkCalendar> = OnceLock::new();

/// England & Wales bank holidays, used for GBP instruments.
///
/// ## Holidays
///
/// - New Year's Day (substitute Monday if weekend)
/// - Good Friday, Easter Monday
/// - Early May (1st Monday in May), Spring (last Monday in May) and
///   Summer (last Monday in August) bank holidays
/// - Christmas Day and Boxing Day with substitute days
/// - One-off royal bank holidays
#[derive(Debug, Clone)]
pub struct UkCalendar {
    holidays: HolidaySet,
}

impl UkCalendar {
    /// Create a new UK calendar.
    pub fn new() -> Self {
        Self {
            holidays: HolidaySet::generate(uk_holidays),
        }
    }

    /// Get the global UK calendar instance.
    pub fn global() -> &'static UkCalendar {
        UK_CALENDAR.get_or_init(UkCalendar::new)
    }
}

impl Default for UkCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for UkCalendar {
    fn name(&self) -> &'static str {
        "UK Bank Holidays"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.holidays.is_business_day(date.as_naive_date())
    }
}

fn uk_holidays(year: i32) -> Vec<NaiveDate> {
    let mut holidays = Vec::with_capacity(10);

    holidays.extend(NaiveDate::from_ymd_opt(year, 1, 1).map(substitute_monday));
    holidays.extend(easter_offset(year, -2));
    holidays.extend(easter_offset(year, 1));

    // Early May: moved to 8 May in 2020 (VE Day)
    holidays.extend(match year {
        2020 => NaiveDate::from_ymd_opt(2020, 5, 8),
        _ => nth_weekday_of_month(year, 5, Weekday::Mon, 1),
    });
    // Spring: moved for the 2002, 2012 and 2022 jubilees
    holidays.extend(match year {
        2002 => NaiveDate::from_ymd_opt(2002, 6, 4),
        2012 => NaiveDate::from_ymd_opt(2012, 6, 4),
        2022 => NaiveDate::from_ymd_opt(2022, 6, 2),
        _ => last_weekday_of_month(year, 5, Weekday::Mon),
    });
    holidays.extend(last_weekday_of_month(year, 8, Weekday::Mon));

    holidays.extend(christmas_holidays(year));
    holidays.extend(special_holidays(year));
    holidays
}

/// Christmas and Boxing Day; a weekend day is replaced by the next free weekday.
fn christmas_holidays(year: i32) -> Vec<NaiveDate> {
    let Some(christmas) = NaiveDate::from_ymd_opt(year, 12, 25) else {
        return Vec::new();
    };
    let days = |offsets: &[i64]| {
        offsets
            .iter()
            .map(|offset| christmas + chrono::Duration::days(*offset))
            .collect()
    };

    match christmas.weekday() {
        // Sat/Sun: substitutes on Mon 27 and Tue 28
        Weekday::Sat => days(&[2, 3]),
        // Sun/Mon: substitute Christmas on Tue 27
        Weekday::Sun => days(&[1, 2]),
        // Fri/Sat: substitute Boxing Day on Mon 28
        Weekday::Fri => days(&[0, 3]),
        _ => days(&[0, 1]),
    }
}

fn special_holidays(year: i32) -> Vec<NaiveDate> {
    let dates: &[(u32, u32)] = match year {
        1999 => &[(12, 31)],
        2002 => &[(6, 3)],
        2011 => &[(4, 29)],
        2012 => &[(6, 5)],
        2022 => &[(6, 3), (9, 19)],
        2023 => &[(5, 8)],
        _ => &[],
    };
    dates
        .iter()
        .filter_map(|(month, day)| NaiveDate::from_ymd_opt(year, *month, *day))
        .collect()
}
