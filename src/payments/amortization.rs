use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dates::{first_due_date, last_due_date, next_payment_date};
use crate::errors::{LoanError, Result};

const MAX_PREALLOCATED_ROWS: u32 = 1200;

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub payment_number: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub ending_balance: f64,
}

/// amortization schedule for a level-payment loan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationSchedule {
    pub payments: Vec<Payment>,
    pub monthly_payment: f64,
    pub final_payment: f64,
    pub total_interest: f64,
}

impl AmortizationSchedule {
    /// Generate the payment schedule.
    ///
    /// Every period but the last pays the level amount. The last period pays
    /// `final_payment` (zero means the level amount) and its interest portion
    /// is whatever is left of that amount after the principal portion, which
    /// is still taken from the level-payment math. The balance therefore
    /// amortizes to zero whatever the final payment is.
    pub fn generate(
        principal: f64,
        start_date: NaiveDate,
        days_until_first_payment: u32,
        nominal_rate: f64,
        term: u32,
        final_payment: f64,
    ) -> Result<Self> {
        let periodic_rate = nominal_rate / 12.0;
        let level = monthly_payment(principal, periodic_rate, term)?;
        let final_payment = if final_payment == 0.0 { level } else { final_payment };

        let mut due_date = first_due_date(start_date, days_until_first_payment)?;
        let anchor_day = due_date.day();
        last_due_date(due_date, term)?;

        let mut payments = Vec::with_capacity(term.min(MAX_PREALLOCATED_ROWS) as usize);
        let mut balance = principal;

        for i in 1..=term {
            let interest = balance * periodic_rate;
            let principal_portion = level - interest;
            balance -= principal_portion;

            let (amount, interest_portion) = if i == term {
                (final_payment, final_payment - principal_portion)
            } else {
                (level, interest)
            };

            payments.push(Payment {
                payment_number: i,
                due_date,
                amount,
                principal_portion,
                interest_portion,
                ending_balance: balance,
            });

            if i < term {
                due_date = next_payment_date(due_date, anchor_day)?;
            }
        }

        let total_interest = payments.iter().map(|p| p.interest_portion).sum();

        log::debug!(
            "generated {} payments: level {:.6}, final {:.6}, interest {:.6}",
            payments.len(),
            level,
            final_payment,
            total_interest
        );

        Ok(Self {
            payments,
            monthly_payment: level,
            final_payment,
            total_interest,
        })
    }

    /// get payment for specific period (1-indexed)
    pub fn get_payment(&self, payment_number: u32) -> Option<&Payment> {
        if payment_number == 0 {
            return None;
        }
        self.payments.get((payment_number - 1) as usize)
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.payments.iter().map(|p| p.principal_portion).sum()
    }
}

/// Level monthly payment `P * r / (1 - (1 + r)^-n)`.
///
/// A zero periodic rate falls back to straight-line `P / n`.
pub fn monthly_payment(principal: f64, periodic_rate: f64, term: u32) -> Result<f64> {
    if term == 0 {
        return Err(LoanError::invalid_input("term must be at least one payment"));
    }

    if periodic_rate == 0.0 {
        return Ok(principal / f64::from(term));
    }

    let payment = principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powf(-f64::from(term)));

    if !payment.is_finite() {
        return Err(LoanError::DegenerateRate { rate: periodic_rate });
    }

    Ok(payment)
}
