//! Calendar arithmetic for payment due dates.
//!
//! Everything here works on `NaiveDate`, so results never depend on the
//! caller's time zone.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::errors::{LoanError, Result};

/// first due date: `start` plus a number of calendar days
pub fn first_due_date(start: NaiveDate, days_until_first_payment: u32) -> Result<NaiveDate> {
    start
        .checked_add_days(Days::new(u64::from(days_until_first_payment)))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("{} plus {} days is out of range", start, days_until_first_payment),
        })
}

/// due date of the last of `term` monthly payments starting at `first`
pub fn last_due_date(first: NaiveDate, term: u32) -> Result<NaiveDate> {
    first
        .checked_add_months(Months::new(term.saturating_sub(1)))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("{} payments from {} run past the calendar", term, first),
        })
}

/// Step to the anchor day of the following month.
///
/// When the anchor is past the end of the target month the date is clamped to
/// that month's last day, so an anchor of 31 lands on Feb 28/29, Apr 30 and
/// so on, and comes back to the 31st in the months that have one.
pub fn next_payment_date(current: NaiveDate, anchor_day: u32) -> Result<NaiveDate> {
    if !(1..=31).contains(&anchor_day) {
        return Err(LoanError::InvalidDate {
            message: format!("anchor day {} is not a day of the month", anchor_day),
        });
    }

    let (year, month) = if current.month() == 12 {
        (current.year() + 1, 1)
    } else {
        (current.year(), current.month() + 1)
    };

    let day = anchor_day.min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| LoanError::InvalidDate {
        message: format!("{}-{:02}-{:02} is out of range", year, month, day),
    })
}

/// 30/360 day count by plain calendar-field subtraction.
///
/// No end-of-month adjustment is applied to either date, so Jan 31 -> Mar 1
/// counts 30 days. Negative when `end` precedes `start`.
pub fn days_30_360(start: NaiveDate, end: NaiveDate) -> i64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    let days = i64::from(end.day()) - i64::from(start.day());

    years * 360 + months * 30 + days
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_anchor_31_clamps_into_short_months() {
        assert_eq!(next_payment_date(date(2023, 1, 31), 31).unwrap(), date(2023, 2, 28));
        assert_eq!(next_payment_date(date(2024, 1, 31), 31).unwrap(), date(2024, 2, 29));
        assert_eq!(next_payment_date(date(2023, 3, 31), 31).unwrap(), date(2023, 4, 30));
    }

    #[test]
    fn test_anchor_restored_after_clamp() {
        // the anchor, not the clamped day, drives the next step
        assert_eq!(next_payment_date(date(2023, 2, 28), 31).unwrap(), date(2023, 3, 31));
        assert_eq!(next_payment_date(date(2024, 2, 29), 30).unwrap(), date(2024, 3, 30));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(next_payment_date(date(2023, 12, 15), 15).unwrap(), date(2024, 1, 15));
        assert_eq!(next_payment_date(date(2023, 12, 31), 31).unwrap(), date(2024, 1, 31));
    }

    #[test]
    fn test_invalid_anchor() {
        assert!(next_payment_date(date(2023, 1, 1), 0).is_err());
        assert!(next_payment_date(date(2023, 1, 1), 32).is_err());
    }

    #[test]
    fn test_first_due_date() {
        assert_eq!(first_due_date(date(2021, 1, 1), 30).unwrap(), date(2021, 1, 31));
        assert_eq!(first_due_date(date(2024, 2, 1), 28).unwrap(), date(2024, 2, 29));
        assert_eq!(first_due_date(date(2021, 1, 1), 0).unwrap(), date(2021, 1, 1));
        assert!(first_due_date(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn test_last_due_date() {
        assert_eq!(last_due_date(date(2021, 1, 31), 12).unwrap(), date(2021, 12, 31));
        assert_eq!(last_due_date(date(2021, 1, 31), 2).unwrap(), date(2021, 2, 28));
        assert_eq!(last_due_date(date(2021, 1, 31), 1).unwrap(), date(2021, 1, 31));
        assert!(last_due_date(date(2021, 1, 31), u32::MAX).is_err());
    }

    #[test]
    fn test_days_30_360_field_subtraction() {
        assert_eq!(days_30_360(date(2021, 1, 1), date(2021, 1, 31)), 30);
        assert_eq!(days_30_360(date(2021, 1, 1), date(2021, 2, 28)), 57);
        assert_eq!(days_30_360(date(2021, 1, 31), date(2021, 3, 1)), 30);
        assert_eq!(days_30_360(date(2021, 1, 1), date(2022, 1, 1)), 360);
        assert_eq!(days_30_360(date(2021, 6, 15), date(2021, 6, 1)), -14);
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
    }
}
