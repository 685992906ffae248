//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation. The search stops once the bracket
/// half-width drops below `(tolerance + relative_tolerance·|x|) / 2` or the
/// objective is exactly zero.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints). An exact zero
/// at either endpoint is returned without further evaluations.
///
/// # Arguments
///
/// * `f` - The objective; may mutate captured state between evaluations
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use ratehike_math::solvers::{brent, SolverConfig};
///
/// let mut calls = 0;
/// let result = brent(
///     |x: f64| {
///         calls += 1;
///         x * x * x - x - 2.0
///     },
///     1.0,
///     2.0,
///     &SolverConfig::default(),
/// )
/// .unwrap();
/// assert!((result.root - 1.5213797068045676).abs() < 1e-12);
/// assert_eq!(result.function_evaluations, calls);
/// ```
pub fn brent<F>(mut f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: FnMut(f64) -> f64,
{
    if config.tolerance.is_nan() || config.tolerance <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "tolerance must be positive, got {}",
            config.tolerance
        )));
    }

    let mut x_pre = a;
    let mut x_cur = b;
    let mut f_pre = f(x_pre);
    let mut f_cur = f(x_cur);
    let mut evaluations = 2;

    if f_pre * f_cur > 0.0 {
        log::debug!("brent: no sign change on [{a}, {b}] (f = {f_pre:.3e}, {f_cur:.3e})");
        return Err(MathError::InvalidBracket {
            a,
            b,
            fa: f_pre,
            fb: f_cur,
        });
    }
    if f_pre == 0.0 {
        return Ok(converged(x_pre, f_pre, 0, evaluations));
    }
    if f_cur == 0.0 {
        return Ok(converged(x_cur, f_cur, 0, evaluations));
    }

    // The root lies between x_cur and x_blk; x_pre is the previous iterate.
    let mut x_blk = 0.0;
    let mut f_blk = 0.0;
    let mut s_pre = 0.0;
    let mut s_cur = 0.0;

    for iteration in 0..config.max_iterations {
        if f_pre != 0.0 && f_cur != 0.0 && f_pre.is_sign_negative() != f_cur.is_sign_negative() {
            x_blk = x_pre;
            f_blk = f_pre;
            s_cur = x_cur - x_pre;
            s_pre = s_cur;
        }
        if f_blk.abs() < f_cur.abs() {
            x_pre = x_cur;
            x_cur = x_blk;
            x_blk = x_pre;

            f_pre = f_cur;
            f_cur = f_blk;
            f_blk = f_pre;
        }

        let delta = (config.tolerance + config.relative_tolerance * x_cur.abs()) / 2.0;
        let s_bis = (x_blk - x_cur) / 2.0;
        if f_cur == 0.0 || s_bis.abs() < delta {
            return Ok(converged(x_cur, f_cur, iteration, evaluations));
        }

        if s_pre.abs() > delta && f_cur.abs() < f_pre.abs() {
            let s_try = if x_pre == x_blk {
                // secant
                -f_cur * (x_cur - x_pre) / (f_cur - f_pre)
            } else {
                // inverse quadratic
                let d_pre = (f_pre - f_cur) / (x_pre - x_cur);
                let d_blk = (f_blk - f_cur) / (x_blk - x_cur);
                -f_cur * (f_blk * d_blk - f_pre * d_pre) / (d_blk * d_pre * (f_blk - f_pre))
            };
            if 2.0 * s_try.abs() < s_pre.abs().min(3.0 * s_bis.abs() - delta) {
                s_pre = s_cur;
                s_cur = s_try;
            } else {
                s_pre = s_bis;
                s_cur = s_bis;
            }
        } else {
            s_pre = s_bis;
            s_cur = s_bis;
        }

        x_pre = x_cur;
        f_pre = f_cur;
        if s_cur.abs() > delta {
            x_cur += s_cur;
        } else {
            x_cur += if s_bis > 0.0 { delta } else { -delta };
        }

        f_cur = f(x_cur);
        evaluations += 1;
    }

    Err(MathError::ConvergenceFailed {
        iterations: config.max_iterations,
        residual: f_cur,
    })
}

fn converged(root: f64, residual: f64, iterations: u32, function_evaluations: u32) -> SolverResult {
    SolverResult {
        root,
        iterations,
        function_evaluations,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_brent_sqrt2() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 0.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_brent_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = brent(f, 2.0, 3.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_brent_exact_endpoint() {
        let mut calls = 0;
        let result = brent(
            |x: f64| {
                calls += 1;
                x - 1.0
            },
            1.0,
            3.0,
            &SolverConfig::default(),
        )
        .unwrap();

        assert_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_brent_mutates_captured_state() {
        // Objective that records every trial, like a curve pillar update
        let mut trials = Vec::new();
        let result = brent(
            |x: f64| {
                trials.push(x);
                (-x).exp() - 0.5
            },
            0.0,
            2.0,
            &SolverConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::LN_2, epsilon = 1e-12);
        assert_eq!(trials.len() as u32, result.function_evaluations);
        assert_eq!(trials[0], 0.0);
        assert_eq!(trials[1], 2.0);
    }

    #[test]
    fn test_brent_max_iterations() {
        let config = SolverConfig::default().with_max_iterations(2);
        let result = brent(|x: f64| x.powi(3) - 0.3, -10.0, 10.0, &config);
        assert!(matches!(result, Err(MathError::ConvergenceFailed { iterations: 2, .. })));
    }

    #[test]
    fn test_brent_rejects_zero_tolerance() {
        let config = SolverConfig::default().with_tolerance(0.0);
        assert!(brent(|x: f64| x, -1.0, 1.0, &config).is_err());
    }

    proptest! {
        #[test]
        fn prop_brent_finds_bracketed_linear_root(root in -5.0f64..5.0, slope in 0.1f64..10.0) {
            let result = brent(|x: f64| slope * (x - root), -10.0, 10.0, &SolverConfig::default())
                .unwrap();
            prop_assert!((result.root - root).abs() < 1e-10);
        }
    }
}
