use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};

/// what to do when the rate bounds do not bracket a root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BracketPolicy {
    /// iterate anyway; the result is some point inside the bounds
    #[default]
    Permissive,
    /// fail with `NonBracketingRoot` before iterating
    Strict,
}

/// Bisection root search on `[lower, upper]`.
///
/// Each step keeps the half whose endpoints differ in sign from `f(lower)`.
/// Stops once the interval is no wider than `tolerance` and returns its
/// midpoint. The bounds are assumed to bracket a root; nothing checks it.
pub fn solve<F>(lower: f64, upper: f64, tolerance: f64, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lower = lower;
    let mut upper = upper;
    let mut f_lower = f(lower);
    let mut iterations = 0u32;

    while upper - lower > tolerance {
        let mid = (lower + upper) / 2.0;
        let f_mid = f(mid);

        if f_mid * f_lower < 0.0 {
            upper = mid;
        } else {
            lower = mid;
            f_lower = f_mid;
        }
        iterations += 1;
    }

    let root = (lower + upper) / 2.0;
    log::debug!("bisection converged to {} after {} iterations", root, iterations);
    root
}

/// [`solve`] with an explicit bracketing policy.
///
/// `Permissive` returns exactly what [`solve`] returns and only logs a
/// warning when `f(lower)` and `f(upper)` share a sign.
pub fn solve_with_policy<F>(
    lower: f64,
    upper: f64,
    tolerance: f64,
    policy: BracketPolicy,
    f: F,
) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let value_at_lower = f(lower);
    let value_at_upper = f(upper);

    if value_at_lower * value_at_upper > 0.0 {
        match policy {
            BracketPolicy::Strict => {
                return Err(LoanError::NonBracketingRoot {
                    lower,
                    upper,
                    value_at_lower,
                    value_at_upper,
                });
            }
            BracketPolicy::Permissive => {
                log::warn!(
                    "rate bounds [{}, {}] do not bracket a root (f = {}, {})",
                    lower,
                    upper,
                    value_at_lower,
                    value_at_upper
                );
            }
        }
    }

    Ok(solve(lower, upper, tolerance, f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_finds_square_root() {
        let root = solve(0.0, 2.0, 1e-10, |x| x * x - 2.0);
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_decreasing_function() {
        let root = solve(0.0, 1.0, 1e-8, |x| 0.3 - x);
        assert_abs_diff_eq!(root, 0.3, epsilon = 1e-8);
    }

    #[test]
    fn test_midpoint_on_root_drifts_to_upper_bound() {
        // 0.25 is hit exactly; f(lower) becomes 0 and no later product is
        // negative, so every remaining step raises the lower bound
        let root = solve(0.0, 1.0, 1e-8, |x| 0.25 - x);
        assert!(root < 0.5);
        assert_abs_diff_eq!(root, 0.5, epsilon = 1e-8);
    }

    #[test]
    fn test_result_within_tolerance_of_root() {
        let tolerance = 1e-4;
        let root = solve(0.0, 0.5, tolerance, |x| x - 0.1);
        assert!((root - 0.1).abs() <= tolerance);
    }

    #[test]
    fn test_idempotent() {
        let f = |x: f64| (1.0 + x).powf(12.0) - 1.5;
        let a = solve(0.0, 0.5, 1e-6, f);
        let b = solve(0.0, 0.5, 1e-6, f);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_interval_already_within_tolerance() {
        // no iterations: midpoint of the supplied bounds
        assert_abs_diff_eq!(solve(0.1, 0.1005, 1e-3, |x| x), 0.10025, epsilon = 1e-15);
    }

    #[test]
    fn test_permissive_drifts_to_upper_bound_without_bracket() {
        // f > 0 everywhere, so every step discards the lower half
        let root = solve(0.2, 0.5, 1e-4, |x| x + 1.0);
        assert!(root < 0.5);
        assert!(0.5 - root <= 1e-4);

        let with_policy = solve_with_policy(0.2, 0.5, 1e-4, BracketPolicy::Permissive, |x| x + 1.0)
            .unwrap();
        assert_eq!(with_policy, root);
    }

    #[test]
    fn test_strict_rejects_missing_bracket() {
        let err = solve_with_policy(0.2, 0.5, 1e-4, BracketPolicy::Strict, |x| x + 1.0).unwrap_err();
        match err {
            LoanError::NonBracketingRoot {
                lower,
                upper,
                value_at_lower,
                value_at_upper,
            } => {
                assert_eq!(lower, 0.2);
                assert_eq!(upper, 0.5);
                assert_abs_diff_eq!(value_at_lower, 1.2, epsilon = 1e-12);
                assert_abs_diff_eq!(value_at_upper, 1.5, epsilon = 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_accepts_bracket() {
        let root = solve_with_policy(0.0, 1.0, 1e-9, BracketPolicy::Strict, |x| x - 0.7).unwrap();
        assert_abs_diff_eq!(root, 0.7, epsilon = 1e-9);
    }
}
