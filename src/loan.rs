use chrono::NaiveDate;
use serde::Serialize;

use crate::apr::{simple_apr, solve_with_policy, AprResult, PresentValueModel};
use crate::config::{LoanTerms, SolverConfig};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{AmortizationSchedule, Payment};

/// A computed installment loan: its schedule and APR figures.
///
/// Built once by [`compute_loan`] and read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    principal: f64,
    nominal_rate: f64,
    term: u32,
    start_date: NaiveDate,
    days_until_first_payment: u32,
    monthly_payment: f64,
    final_payment: f64,
    total_interest: f64,
    payments: Vec<Payment>,
    simple_apr: f64,
    bisection_simple_apr: AprResult,
    bisection_actual_apr: AprResult,
}

/// compute the schedule and APR figures for a set of loan terms
pub fn compute_loan(terms: &LoanTerms) -> Result<Loan> {
    terms.validate()?;

    let principal = terms.principal.to_f64();
    let nominal_rate = terms.nominal_rate.to_f64();
    let solver = terms.solver;

    let schedule = AmortizationSchedule::generate(
        principal,
        terms.start_date,
        terms.days_until_first_payment,
        nominal_rate,
        terms.term,
        terms.final_payment.to_f64(),
    )?;

    let simple_apr = simple_apr(principal, schedule.monthly_payment, terms.term, nominal_rate);

    let simple_model = PresentValueModel::simple(
        principal,
        terms.term,
        schedule.monthly_payment,
        schedule.final_payment,
        terms.days_until_first_payment,
    );
    let actual_model = PresentValueModel::actual(principal, terms.start_date, &schedule.payments);

    let bisection_simple_apr = AprResult::compare(solve_model(&simple_model, &solver)?, simple_apr);
    let bisection_actual_apr = AprResult::compare(solve_model(&actual_model, &solver)?, simple_apr);

    log::info!(
        "loan of {} at {} over {} months: payment {:.6}, simple APR {:.6}, bisection APRs {:.6} / {:.6}",
        terms.principal,
        terms.nominal_rate,
        terms.term,
        schedule.monthly_payment,
        simple_apr,
        bisection_simple_apr.value,
        bisection_actual_apr.value
    );

    Ok(Loan {
        principal,
        nominal_rate,
        term: terms.term,
        start_date: terms.start_date,
        days_until_first_payment: terms.days_until_first_payment,
        monthly_payment: schedule.monthly_payment,
        final_payment: schedule.final_payment,
        total_interest: schedule.total_interest,
        payments: schedule.payments,
        simple_apr,
        bisection_simple_apr,
        bisection_actual_apr,
    })
}

fn solve_model(model: &PresentValueModel<'_>, solver: &SolverConfig) -> Result<f64> {
    log::debug!("solving {} present value model", model.name());
    solve_with_policy(
        solver.lower_rate_bound,
        solver.upper_rate_bound,
        solver.tolerance,
        solver.bracket_policy,
        |rate| model.evaluate(rate),
    )
}

impl Loan {
    /// compute from positional inputs
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        principal: Money,
        nominal_rate: Rate,
        term: u32,
        start_date: NaiveDate,
        days_until_first_payment: u32,
        final_payment: Money,
        lower_rate_bound: f64,
        upper_rate_bound: f64,
        tolerance: f64,
    ) -> Result<Self> {
        let terms = LoanTerms {
            principal,
            nominal_rate,
            term,
            start_date,
            days_until_first_payment,
            final_payment,
            solver: SolverConfig::new(lower_rate_bound, upper_rate_bound, tolerance),
        };
        compute_loan(&terms)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn nominal_rate(&self) -> f64 {
        self.nominal_rate
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn days_until_first_payment(&self) -> u32 {
        self.days_until_first_payment
    }

    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    pub fn final_payment(&self) -> f64 {
        self.final_payment
    }

    pub fn total_interest(&self) -> f64 {
        self.total_interest
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn simple_apr(&self) -> f64 {
        self.simple_apr
    }

    pub fn bisection_simple_apr(&self) -> &AprResult {
        &self.bisection_simple_apr
    }

    pub fn bisection_actual_apr(&self) -> &AprResult {
        &self.bisection_actual_apr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apr::BracketPolicy;
    use crate::errors::LoanError;
    use approx::assert_abs_diff_eq;

    fn reference_loan(year: i32) -> Loan {
        Loan::compute(
            Money::from_major(1_000),
            Rate::from_percentage(10),
            12,
            NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            30,
            Money::ZERO,
            0.0,
            0.5,
            0.0001,
        )
        .unwrap()
    }

    #[test]
    fn test_resolves_final_payment() {
        let loan = reference_loan(2021);
        assert_eq!(loan.final_payment(), loan.monthly_payment());
        assert_eq!(loan.payments().len(), 12);
        assert_eq!(loan.term(), 12);
        assert_eq!(loan.days_until_first_payment(), 30);
        assert_eq!(loan.principal(), 1000.0);
        assert_eq!(loan.nominal_rate(), 0.1);
    }

    #[test]
    fn test_total_interest_is_sum_of_rows() {
        let loan = reference_loan(2021);
        let sum: f64 = loan.payments().iter().map(|p| p.interest_portion).sum();
        assert_eq!(loan.total_interest(), sum);
    }

    #[test]
    fn test_apr_figures() {
        let loan = reference_loan(2022);
        assert_abs_diff_eq!(loan.simple_apr(), 0.10, epsilon = 1e-6);
        assert_abs_diff_eq!(loan.bisection_simple_apr().value, 0.100006, epsilon = 1e-6);
        assert!(!loan.bisection_simple_apr().over_threshold);
        assert_abs_diff_eq!(loan.bisection_actual_apr().value, 0.099884, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_terms_rejected_before_calculation() {
        let err = Loan::compute(
            Money::from_major(1_000),
            Rate::from_percentage(10),
            12,
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            30,
            Money::ZERO,
            0.5,
            0.0,
            0.0001,
        )
        .unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { .. }));
    }

    #[test]
    fn test_strict_policy_surfaces_non_bracketing_bounds() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(1_000))
            .nominal_rate(Rate::from_percentage(10))
            .term(12)
            .start_date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap())
            .rate_bounds(0.2, 0.5)
            .tolerance(0.0001)
            .bracket_policy(BracketPolicy::Strict)
            .build()
            .unwrap();

        let err = compute_loan(&terms).unwrap_err();
        assert!(matches!(err, LoanError::NonBracketingRoot { .. }));
    }

    #[test]
    fn test_permissive_policy_walks_to_upper_bound() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(1_000))
            .nominal_rate(Rate::from_percentage(10))
            .term(12)
            .start_date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap())
            .rate_bounds(0.2, 0.5)
            .tolerance(0.0001)
            .build()
            .unwrap();

        // NPV is negative across the whole interval, so bisection walks to
        // the upper bound instead of failing
        let loan = compute_loan(&terms).unwrap();
        assert!(loan.bisection_simple_apr().value > 0.499);
        assert!(loan.bisection_simple_apr().over_threshold);
    }
}
