//! # RateHike Core
//!
//! Date and calendar arithmetic for the RateHike curve bootstrapping library.
//!
//! This crate provides the building blocks the curve layer consumes:
//!
//! - **Types**: [`Date`](types::Date) and [`Period`](types::Period)
//! - **Day Count Conventions**: ACT/360, ACT/365F and 30E/360 year fractions
//! - **Business Day Calendars**: TARGET2 and UK bank holidays, adjustment
//!   conventions and date rolling rules
//!
//! ## Example
//!
//! ```rust
//! use ratehike_core::prelude::*;
//!
//! let today = Date::from_ymd(2023, 7, 6).unwrap();
//! let maturity = roll_date(
//!     Target2Calendar::global(),
//!     today,
//!     Period::months(6),
//!     RollRule::Standard,
//!     BusinessDayConvention::ModifiedFollowing,
//! )
//! .unwrap();
//! assert_eq!(maturity, Date::from_ymd(2024, 1, 8).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        roll_date, roll_dates, BusinessDayConvention, Calendar, RollRule, Target2Calendar,
        UkCalendar, WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Period, TimeUnit};
}

pub use error::{CoreError, CoreResult};
pub use types::{Date, Period, TimeUnit};
