use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::apr::BracketPolicy;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// bisection search settings for the APR solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub lower_rate_bound: f64,
    pub upper_rate_bound: f64,
    pub tolerance: f64,
    pub bracket_policy: BracketPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower_rate_bound: 0.0,
            upper_rate_bound: 0.5,
            tolerance: 1e-6,
            bracket_policy: BracketPolicy::Permissive,
        }
    }
}

impl SolverConfig {
    pub fn new(lower_rate_bound: f64, upper_rate_bound: f64, tolerance: f64) -> Self {
        Self {
            lower_rate_bound,
            upper_rate_bound,
            tolerance,
            ..Self::default()
        }
    }

    pub fn strict(mut self) -> Self {
        self.bracket_policy = BracketPolicy::Strict;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LoanError::invalid_input(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        if !self.lower_rate_bound.is_finite() || !self.upper_rate_bound.is_finite() {
            return Err(LoanError::invalid_input("rate bounds must be finite"));
        }

        if self.lower_rate_bound >= self.upper_rate_bound {
            return Err(LoanError::invalid_input(format!(
                "lower rate bound {} must be below upper rate bound {}",
                self.lower_rate_bound, self.upper_rate_bound
            )));
        }

        Ok(())
    }
}

/// terms of a fixed-rate installment loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub nominal_rate: Rate,
    pub term: u32,
    pub start_date: NaiveDate,
    #[serde(default = "default_days_until_first_payment")]
    pub days_until_first_payment: u32,
    /// zero means "use the level payment"
    #[serde(default)]
    pub final_payment: Money,
    #[serde(default)]
    pub solver: SolverConfig,
}

fn default_days_until_first_payment() -> u32 {
    30
}

impl LoanTerms {
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// parse terms from a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let terms: LoanTerms = serde_json::from_str(json)?;
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LoanError::invalid_input(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }

        if self.term == 0 {
            return Err(LoanError::invalid_input("term must be at least one payment"));
        }

        self.solver.validate()
    }
}

/// builder for loan terms
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    nominal_rate: Option<Rate>,
    term: Option<u32>,
    start_date: Option<NaiveDate>,
    days_until_first_payment: u32,
    final_payment: Money,
    solver: SolverConfig,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self {
            principal: None,
            nominal_rate: None,
            term: None,
            start_date: None,
            days_until_first_payment: default_days_until_first_payment(),
            final_payment: Money::ZERO,
            solver: SolverConfig::default(),
        }
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn nominal_rate(mut self, rate: Rate) -> Self {
        self.nominal_rate = Some(rate);
        self
    }

    pub fn term(mut self, months: u32) -> Self {
        self.term = Some(months);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn days_until_first_payment(mut self, days: u32) -> Self {
        self.days_until_first_payment = days;
        self
    }

    pub fn final_payment(mut self, amount: Money) -> Self {
        self.final_payment = amount;
        self
    }

    pub fn rate_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.solver.lower_rate_bound = lower;
        self.solver.upper_rate_bound = upper;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    pub fn bracket_policy(mut self, policy: BracketPolicy) -> Self {
        self.solver.bracket_policy = policy;
        self
    }

    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self
            .principal
            .ok_or_else(|| LoanError::invalid_input("principal required"))?;

        let nominal_rate = self
            .nominal_rate
            .ok_or_else(|| LoanError::invalid_input("nominal rate required"))?;

        let term = self
            .term
            .ok_or_else(|| LoanError::invalid_input("term required"))?;

        let start_date = self
            .start_date
            .ok_or_else(|| LoanError::invalid_input("start date required"))?;

        let terms = LoanTerms {
            principal,
            nominal_rate,
            term,
            start_date,
            days_until_first_payment: self.days_until_first_payment,
            final_payment: self.final_payment,
            solver: self.solver,
        };
        terms.validate()?;
        Ok(terms)
    }
}

impl Default for LoanTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
