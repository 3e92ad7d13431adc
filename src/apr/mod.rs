pub mod bisection;
pub mod present_value;

use serde::Serialize;

pub use bisection::{solve, solve_with_policy, BracketPolicy};
pub use present_value::PresentValueModel;

/// Regulation Z tolerance: 1/8 of 1 percent
pub const REG_Z_TOLERANCE: f64 = 0.01 / 8.0;

/// band used to express a deviation as a fraction of the tolerance
const TOLERANCE_BAND: f64 = 1.0 / 800.0;

/// an APR estimate compared against the closed-form simple APR
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AprResult {
    pub value: f64,
    pub diff: f64,
    pub threshold_fraction: f64,
    pub over_threshold: bool,
}

impl AprResult {
    pub fn compare(value: f64, simple_apr: f64) -> Self {
        let diff = (value - simple_apr).abs();
        Self {
            value,
            diff,
            threshold_fraction: diff / TOLERANCE_BAND,
            over_threshold: diff > REG_Z_TOLERANCE,
        }
    }

    pub fn within_tolerance(&self) -> bool {
        !self.over_threshold
    }
}

/// Closed-form APR from simple interest over the term.
///
/// Algebraically this reduces to `nominal_rate`; it is still evaluated
/// through the simple interest and day counts, step by step.
pub fn simple_apr(principal: f64, _monthly_payment: f64, term: u32, nominal_rate: f64) -> f64 {
    let months = f64::from(term);
    let simple_interest = principal * nominal_rate * months / 12.0;
    let days_in_term = months / 12.0 * 365.0;
    (simple_interest / principal) * (1.0 / days_in_term) * 365.0
}
