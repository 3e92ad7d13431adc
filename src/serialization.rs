/// serializable statement view of a computed loan
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::apr::AprResult;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loan::Loan;
use crate::payments::Payment;

const CENTS: u32 = 2;
const RATE_DP: u32 = 8;

#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub principal: Money,
    pub nominal_rate: Rate,
    pub term: u32,
    pub start_date: NaiveDate,
    pub days_until_first_payment: u32,
    pub monthly_payment: Money,
    pub final_payment: Money,
    pub total_interest: Money,
    pub simple_apr: Rate,
    pub bisection_simple_apr: AprView,
    pub bisection_actual_apr: AprView,
    pub payments: Vec<PaymentView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentView {
    pub payment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AprView {
    pub apr: Rate,
    pub diff: Rate,
    pub threshold_fraction: Rate,
    pub within_tolerance: bool,
}

impl LoanView {
    /// round a computed loan to cents and fixed-precision rates
    pub fn from_loan(loan: &Loan) -> Result<Self> {
        let payments = loan
            .payments()
            .iter()
            .map(PaymentView::from_payment)
            .collect::<Result<Vec<_>>>()?;

        Ok(LoanView {
            principal: cents(loan.principal())?,
            nominal_rate: rate(loan.nominal_rate())?,
            term: loan.term(),
            start_date: loan.start_date(),
            days_until_first_payment: loan.days_until_first_payment(),
            monthly_payment: cents(loan.monthly_payment())?,
            final_payment: cents(loan.final_payment())?,
            total_interest: cents(loan.total_interest())?,
            simple_apr: rate(loan.simple_apr())?,
            bisection_simple_apr: AprView::from_result(loan.bisection_simple_apr())?,
            bisection_actual_apr: AprView::from_result(loan.bisection_actual_apr())?,
            payments,
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PaymentView {
    pub fn from_payment(payment: &Payment) -> Result<Self> {
        Ok(PaymentView {
            payment_number: payment.payment_number,
            due_date: payment.due_date,
            amount: cents(payment.amount)?,
            principal_portion: cents(payment.principal_portion)?,
            interest_portion: cents(payment.interest_portion)?,
            ending_balance: cents(payment.ending_balance)?,
        })
    }
}

impl AprView {
    pub fn from_result(result: &AprResult) -> Result<Self> {
        Ok(AprView {
            apr: rate(result.value)?,
            diff: rate(result.diff)?,
            threshold_fraction: rate(result.threshold_fraction)?,
            within_tolerance: result.within_tolerance(),
        })
    }
}

fn cents(value: f64) -> Result<Money> {
    Money::from_f64_rounded(value, CENTS)
}

fn rate(value: f64) -> Result<Rate> {
    Rate::from_f64_rounded(value, RATE_DP)
}
