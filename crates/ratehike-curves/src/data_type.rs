//! Raw quantity stored at the curve pillars.
//!
//! The interpolation engine works on one raw quantity per pillar. The data
//! type decides what that quantity is and converts it to discount factors,
//! zero rates and instantaneous forwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw quantity interpolated between pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Continuously compounded zero rate `z`, `df = exp(-z·t)`.
    #[serde(rename = "zero")]
    Zero,
    /// Discount factor itself.
    #[serde(rename = "df")]
    Df,
    /// Natural log of the discount factor.
    #[default]
    #[serde(rename = "logdf")]
    LogDf,
}

impl DataType {
    /// Discount factor from a raw value at time `t`.
    #[must_use]
    pub fn discount_factor(self, raw: f64, t: f64) -> f64 {
        match self {
            DataType::Zero => (-raw * t).exp(),
            DataType::Df => raw,
            DataType::LogDf => raw.exp(),
        }
    }

    /// Zero rate from a raw value at time `t`; 0 at the origin.
    #[must_use]
    pub fn zero_rate(self, raw: f64, t: f64) -> f64 {
        match self {
            DataType::Zero => raw,
            _ if t == 0.0 => 0.0,
            DataType::Df => -raw.ln() / t,
            DataType::LogDf => -raw / t,
        }
    }

    /// Instantaneous forward rate from a raw value and its time derivative.
    #[must_use]
    pub fn instantaneous_forward(self, raw: f64, d_raw: f64, t: f64) -> f64 {
        match self {
            DataType::Zero => raw + t * d_raw,
            DataType::Df => -d_raw / raw,
            DataType::LogDf => -d_raw,
        }
    }

    /// Raw value representing discount factor `df` at time `t`.
    #[must_use]
    pub fn from_discount_factor(self, df: f64, t: f64) -> f64 {
        match self {
            DataType::Zero if t == 0.0 => 0.0,
            DataType::Zero => -df.ln() / t,
            DataType::Df => df,
            DataType::LogDf => df.ln(),
        }
    }

    /// Setting name of the data type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DataType::Zero => "zero",
            DataType::Df => "df",
            DataType::LogDf => "logdf",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
