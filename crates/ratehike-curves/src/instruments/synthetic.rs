//! Synthetic instruments.

use ratehike_core::Date;

/// A pillar with a precomputed discount factor, calibrated without a
/// root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticInstrument {
    discount_factor: f64,
    maturity_date: Date,
}

impl SyntheticInstrument {
    /// Creates a synthetic instrument.
    #[must_use]
    pub fn new(discount_factor: f64, maturity_date: Date) -> Self {
        Self {
            discount_factor,
            maturity_date,
        }
    }

    /// Discount factor at the maturity date.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Pillar date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }
}
