//! Date type for curve calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date without time-of-day.
///
/// Serializes as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses a date in `YYYY-MM-DD` format.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of month (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the number of days in this date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds calendar days (negative values subtract).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds calendar months, clamping the day to the target month's length.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));
        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying chrono date.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Last calendar day of this date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.add_days(i64::from(self.days_in_month() - self.day()))
    }

    /// Returns true on the last calendar day of the month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Day of the week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns true on Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_months_clamps_day() {
        let date = Date::from_ymd(2025, 1, 31).unwrap();
        let result = date.add_months(1).unwrap();
        assert_eq!(result, Date::from_ymd(2025, 2, 28).unwrap());

        let leap = Date::from_ymd(2024, 1, 31).unwrap().add_months(1).unwrap();
        assert_eq!(leap, Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_add_months_across_years() {
        let date = Date::from_ymd(2023, 11, 15).unwrap();
        assert_eq!(date.add_months(3).unwrap(), Date::from_ymd(2024, 2, 15).unwrap());
        assert_eq!(date.add_months(-11).unwrap(), Date::from_ymd(2022, 12, 15).unwrap());
        assert_eq!(date.add_months(24).unwrap(), Date::from_ymd(2025, 11, 15).unwrap());
    }

    #[test]
    fn test_end_of_month() {
        let date = Date::from_ymd(2023, 2, 10).unwrap();
        assert_eq!(date.end_of_month(), Date::from_ymd(2023, 2, 28).unwrap());
        assert!(date.end_of_month().is_end_of_month());
        assert!(!date.is_end_of_month());

        let dec = Date::from_ymd(2023, 12, 1).unwrap();
        assert_eq!(dec.end_of_month(), Date::from_ymd(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2025, 1, 1).unwrap();
        let d2 = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(d1.days_between(&d2), 30);
        assert_eq!(d2.days_between(&d1), -30);
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2023-07-06".parse().unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), 7);
        assert_eq!(date.day(), 6);
        assert_eq!(date.to_string(), "2023-07-06");

        assert!(Date::parse("2023-02-30").is_err());
        assert!(Date::parse("06/07/2023").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let date = Date::from_ymd(2023, 7, 6).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2023-07-06\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn test_weekend_detection() {
        assert!(Date::from_ymd(2023, 7, 8).unwrap().is_weekend());
        assert!(!Date::from_ymd(2023, 7, 6).unwrap().is_weekend());
    }
}
