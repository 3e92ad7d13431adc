/// quick start - compute a schedule and APR figures for a small loan
use installment_apr::chrono::NaiveDate;
use installment_apr::{compute_loan, LoanTerms, LoanView, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $1,000 over 12 months at 10%, first payment due in 30 days
    let terms = LoanTerms::builder()
        .principal(Money::from_major(1_000))
        .nominal_rate(Rate::from_percentage(10))
        .term(12)
        .start_date(NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad date")?)
        .days_until_first_payment(30)
        .build()?;

    let loan = compute_loan(&terms)?;

    let actual = loan.bisection_actual_apr();
    println!("monthly payment: {:.2}", loan.monthly_payment());
    println!("total interest:  {:.2}", loan.total_interest());
    println!("simple apr:      {:.6}", loan.simple_apr());
    println!(
        "actual apr:      {:.6} (within tolerance: {})",
        actual.value,
        actual.within_tolerance()
    );

    // full statement as json
    println!("{}", LoanView::from_loan(&loan)?.to_json_pretty()?);

    Ok(())
}
