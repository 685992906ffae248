//! Rule-based holiday generation.
//!
//! Calendars describe their holidays as a function from a year to the list
//! of holiday dates in that year. [`HolidaySet`] evaluates that function
//! once over a fixed range of years and answers membership queries.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// First year covered by the generated holiday sets.
pub const MIN_YEAR: i32 = 1990;
/// Last year covered by the generated holiday sets.
pub const MAX_YEAR: i32 = 2150;

/// Precomputed holidays of one calendar.
///
/// Years outside `MIN_YEAR..=MAX_YEAR` have no holidays (weekends only).
#[derive(Debug, Clone)]
pub struct HolidaySet {
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    /// Evaluates `rule` for every supported year.
    pub fn generate(rule: impl Fn(i32) -> Vec<NaiveDate>) -> Self {
        let dates = (MIN_YEAR..=MAX_YEAR).flat_map(rule).collect();
        Self { dates }
    }

    /// Returns true if the date is a generated holiday.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns true if the date is neither a weekend nor a holiday.
    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.contains(date)
    }
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Easter Sunday shifted by `offset` days (-2 is Good Friday, 1 is Easter Monday).
pub(crate) fn easter_offset(year: i32, offset: i64) -> Option<NaiveDate> {
    easter_sunday(year).map(|easter| easter + chrono::Duration::days(offset))
}

/// The `n`-th occurrence (1-based) of a weekday in a month.
pub(crate) fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    n: u32,
) -> Option<NaiveDate> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_until = (weekday.num_days_from_monday() as i32
        - first_of_month.weekday().num_days_from_monday() as i32)
        .rem_euclid(7) as u32;

    NaiveDate::from_ymd_opt(year, month, 1 + days_until + (n - 1) * 7)
}

/// The last occurrence of a weekday in a month.
pub(crate) fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?.pred_opt()?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
    };

    let days_back = (last_day.weekday().num_days_from_monday() as i32
        - weekday.num_days_from_monday() as i32)
        .rem_euclid(7);

    last_day.checked_sub_signed(chrono::Duration::days(i64::from(days_back)))
}

/// A fixed holiday moved to the following Monday when it falls on a weekend.
pub(crate) fn substitute_monday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + chrono::Duration::days(2),
        Weekday::Sun => date + chrono::Duration::days(1),
        _ => date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_sunday() {
        assert_eq!(easter_sunday(2023), Some(ymd(2023, 4, 9)));
        assert_eq!(easter_sunday(2024), Some(ymd(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(ymd(2025, 4, 20)));
        assert_eq!(easter_offset(2023, -2), Some(ymd(2023, 4, 7)));
    }

    #[test]
    fn test_weekday_of_month() {
        // First Monday of May 2023
        assert_eq!(
            nth_weekday_of_month(2023, 5, Weekday::Mon, 1),
            Some(ymd(2023, 5, 1))
        );
        // Last Monday of August 2023
        assert_eq!(
            last_weekday_of_month(2023, 8, Weekday::Mon),
            Some(ymd(2023, 8, 28))
        );
        // Last Monday of December 2023
        assert_eq!(
            last_weekday_of_month(2023, 12, Weekday::Mon),
            Some(ymd(2023, 12, 25))
        );
    }

    #[test]
    fn test_substitute_monday() {
        assert_eq!(substitute_monday(ymd(2022, 1, 1)), ymd(2022, 1, 3));
        assert_eq!(substitute_monday(ymd(2023, 1, 1)), ymd(2023, 1, 2));
        assert_eq!(substitute_monday(ymd(2024, 1, 1)), ymd(2024, 1, 1));
    }

    #[test]
    fn test_holiday_set_membership() {
        let set = HolidaySet::generate(|year| {
            NaiveDate::from_ymd_opt(year, 5, 1).into_iter().collect()
        });
        assert!(set.contains(ymd(2023, 5, 1)));
        assert!(!set.is_business_day(ymd(2023, 5, 1)));
        assert!(!set.is_business_day(ymd(2023, 5, 6)));
        assert!(set.is_business_day(ymd(2023, 5, 2)));
    }
}
