use chrono::NaiveDate;

use crate::dates::days_30_360;
use crate::payments::Payment;

/// Net present value of a loan's cash flows as a function of an annual rate.
///
/// `evaluate(r)` is `-principal + sum(discounted payments)`, zero at the rate
/// implied by the cash flows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentValueModel<'a> {
    /// idealized schedule: 30-day periods, monthly compounding
    Simple {
        principal: f64,
        term: u32,
        monthly_payment: f64,
        final_payment: f64,
        days_until_first_payment: u32,
    },
    /// computed schedule: real due dates on a 30/360 basis, daily compounding
    Actual {
        principal: f64,
        start_date: NaiveDate,
        payments: &'a [Payment],
    },
}

impl<'a> PresentValueModel<'a> {
    pub fn simple(
        principal: f64,
        term: u32,
        monthly_payment: f64,
        final_payment: f64,
        days_until_first_payment: u32,
    ) -> Self {
        PresentValueModel::Simple {
            principal,
            term,
            monthly_payment,
            final_payment,
            days_until_first_payment,
        }
    }

    pub fn actual(principal: f64, start_date: NaiveDate, payments: &'a [Payment]) -> Self {
        PresentValueModel::Actual {
            principal,
            start_date,
            payments,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PresentValueModel::Simple { .. } => "simple",
            PresentValueModel::Actual { .. } => "actual",
        }
    }

    pub fn evaluate(&self, rate: f64) -> f64 {
        match *self {
            PresentValueModel::Simple {
                principal,
                term,
                monthly_payment,
                final_payment,
                days_until_first_payment,
            } => {
                let base = 1.0 + rate / 12.0;
                let offset = f64::from(days_until_first_payment) / 30.0;

                let mut pv = -principal;
                // every period but the last is a level payment
                for i in 0..term.saturating_sub(1) {
                    pv += monthly_payment / base.powf(f64::from(i) + offset);
                }
                if term > 0 {
                    pv += final_payment / base.powf(f64::from(term - 1) + offset);
                }
                pv
            }
            PresentValueModel::Actual {
                principal,
                start_date,
                payments,
            } => {
                let base = 1.0 + rate / 360.0;

                payments.iter().fold(-principal, |pv, payment| {
                    let days = days_30_360(start_date, payment.due_date);
                    pv + payment.amount / base.powf(days as f64)
                })
            }
        }
    }
}
