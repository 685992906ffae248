//! Error types for curve construction and calibration.

use ratehike_core::CoreError;
use ratehike_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug)]
pub enum CurveError {
    /// The root search found no sign change for an instrument.
    #[error("Root bracketing failed for {instrument} at pillar {pillar}: {source}")]
    RootBracketing {
        /// Description of the instrument being calibrated.
        instrument: String,
        /// Pillar index being solved.
        pillar: usize,
        /// Underlying solver error.
        #[source]
        source: MathError,
    },

    /// ONTN re-anchoring was given an instrument that is not an overnight deposit.
    #[error("ONTN re-anchoring requires an overnight deposit: {reason}")]
    ReAnchorInstrument {
        /// Why the instrument was rejected.
        reason: String,
    },

    /// ONTN re-anchoring was requested without an instrument.
    #[error("ONTN re-anchoring requires an overnight deposit, none given")]
    MissingReAnchorInstrument,

    /// The curve state does not allow the requested re-anchoring.
    #[error("Re-anchoring not possible: {reason}")]
    ReAnchorPrecondition {
        /// Description of the violated precondition.
        reason: String,
    },

    /// Synthetic instruments need a discount curve.
    #[error("Synthetic {kind} instruments require a discount curve")]
    MissingDiscountCurve {
        /// Synthetic instrument kind.
        kind: String,
    },

    /// Pillar times are not strictly increasing.
    #[error("Pillar times must be strictly increasing: t[{index}] = {current} after {prev}")]
    NonMonotonicTimes {
        /// Index of the offending pillar.
        index: usize,
        /// Previous pillar time.
        prev: f64,
        /// Offending pillar time.
        current: f64,
    },

    /// A pillar was queried before it was calibrated.
    #[error("Pillar {pillar} is not set ({n_set} pillars populated)")]
    PillarNotSet {
        /// Requested pillar.
        pillar: usize,
        /// Number of populated pillars.
        n_set: usize,
    },

    /// A pillar index lies outside the time grid.
    #[error("Pillar {pillar} is outside the grid of {n_pillars} pillars")]
    PillarOutOfRange {
        /// Requested pillar.
        pillar: usize,
        /// Number of pillars in the grid.
        n_pillars: usize,
    },

    /// Instrument definition is invalid.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of the problem.
        reason: String,
    },

    /// No instruments were supplied.
    #[error("No instruments provided for bootstrap")]
    EmptyInstrumentSet,

    /// Settings or parameters are invalid.
    #[error("Invalid settings: {reason}")]
    InvalidSettings {
        /// Description of the problem.
        reason: String,
    },

    /// Date or calendar failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Instrument file could not be read.
    #[error("Instrument file error: {0}")]
    Csv(#[from] csv::Error),

    /// Settings file could not be parsed.
    #[error("Settings parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CurveError {
    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid settings error.
    #[must_use]
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            reason: reason.into(),
        }
    }

    /// Creates a re-anchoring instrument error.
    #[must_use]
    pub fn re_anchor_instrument(reason: impl Into<String>) -> Self {
        Self::ReAnchorInstrument {
            reason: reason.into(),
        }
    }

    /// Creates a re-anchoring precondition error.
    #[must_use]
    pub fn re_anchor_precondition(reason: impl Into<String>) -> Self {
        Self::ReAnchorPrecondition {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_bracketing_display() {
        let err = CurveError::RootBracketing {
            instrument: "ois 10YR".to_string(),
            pillar: 12,
            source: MathError::InvalidBracket {
                a: 0.6,
                b: 0.8,
                fa: 0.01,
                fb: 0.02,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("ois 10YR"));
        assert!(msg.contains("pillar 12"));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: CurveError = CoreError::invalid_date("2023-13-01").into();
        assert_eq!(err.to_string(), "Invalid date: 2023-13-01");
    }
}
