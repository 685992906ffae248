//! 30E/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30E/360 (Eurobond basis).
///
/// A day 31 on either date is treated as day 30; February is not adjusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        let months = i64::from(end.month()) - i64::from(start.month());
        let years = i64::from(end.year() - start.year());
        360 * years + 30 * months + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_year() {
        let start = Date::from_ymd(2023, 7, 10).unwrap();
        let end = Date::from_ymd(2024, 7, 10).unwrap();
        assert_eq!(Thirty360E.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_month_end_31() {
        let start = Date::from_ymd(2023, 1, 31).unwrap();
        let end = Date::from_ymd(2023, 3, 31).unwrap();
        assert_eq!(Thirty360E.day_count(start, end), 60);
    }

    #[test]
    fn test_february_not_adjusted() {
        let start = Date::from_ymd(2023, 2, 28).unwrap();
        let end = Date::from_ymd(2023, 3, 31).unwrap();
        assert_eq!(Thirty360E.day_count(start, end), 32);
    }
}
