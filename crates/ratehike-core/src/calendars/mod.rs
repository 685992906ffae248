//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and the TARGET2 and UK holiday calendars
//! - Business day adjustment conventions
//! - Date rolling rules used to build instrument schedules

mod conventions;
mod holidays;
mod rolling;
mod target2;
mod uk;

pub use conventions::BusinessDayConvention;
pub use holidays::{easter_sunday, HolidaySet};
pub use rolling::{roll_date, roll_dates, RollRule};
pub use target2::Target2Calendar;
pub use uk::UkCalendar;

use crate::error::CoreResult;
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }
}

/// A calendar with weekends only (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}
