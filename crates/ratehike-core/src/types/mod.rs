//! Domain types for dates and tenors.

mod date;
mod period;

pub use date::Date;
pub use period::{Period, TimeUnit};
