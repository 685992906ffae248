//! End conditions for the terminal cubic interval.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PillarTable;

/// Boundary policy applied to the last interval of a cubic curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SplineCorrection {
    /// Keep the Hermite coefficients.
    #[default]
    #[serde(rename = "no")]
    None,
    /// Make the terminal interval a straight chord.
    #[serde(rename = "linear")]
    Linear,
    /// Zero second derivative at the last pillar.
    #[serde(rename = "natural")]
    Natural,
}

impl SplineCorrection {
    /// Setting name of the correction.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SplineCorrection::None => "no",
            SplineCorrection::Linear => "linear",
            SplineCorrection::Natural => "natural",
        }
    }

    /// Overwrites the coefficients of interval `[n-2, n-1]` and the
    /// terminal slope. Needs at least two populated pillars.
    pub(super) fn apply(self, table: &mut PillarTable) {
        let n = table.n_set;
        if n < 2 || self == SplineCorrection::None {
            return;
        }
        let last = n - 1;
        let i = n - 2;
        let dx = table.times[last] - table.times[i];
        let dy = table.values[last] - table.values[i];

        match self {
            SplineCorrection::None => {}
            SplineCorrection::Linear => {
                table.slopes[i] = dy / dx;
                table.quadratic[i] = 0.0;
                table.cubic[i] = 0.0;
            }
            SplineCorrection::Natural => {
                let b = table.slopes[i];
                table.quadratic[i] = 3.0 * (dy - b * dx) / (2.0 * dx * dx);
                table.cubic[i] = (b * dx - dy) / (2.0 * dx * dx * dx);
            }
        }
        table.slopes[last] = 0.0;
    }
}

impl fmt::Display for SplineCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
