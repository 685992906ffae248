//! Root-finding algorithms.
//!
//! - [`brent`]: bracketed root finder combining bisection, secant and
//!   inverse quadratic interpolation
//!
//! The objective is `FnMut`: curve calibration commits every trial value
//! into the curve before pricing against it.

mod brent;

pub use brent::brent;

/// Default absolute tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default relative tolerance (four machine epsilons).
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Default maximum iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the root.
    pub tolerance: f64,
    /// Relative tolerance on the root, scaled by its magnitude.
    pub relative_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Number of objective evaluations, endpoints included.
    pub function_evaluations: u32,
    /// Function value at the root.
    pub residual: f64,
}
