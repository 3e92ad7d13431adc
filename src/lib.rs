pub mod apr;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod serialization;

// re-export key types
pub use apr::{simple_apr, AprResult, BracketPolicy, PresentValueModel, REG_Z_TOLERANCE};
pub use config::{LoanTerms, LoanTermsBuilder, SolverConfig};
pub use dates::next_payment_date;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use loan::{compute_loan, Loan};
pub use payments::{monthly_payment, AmortizationSchedule, Payment};
pub use serialization::LoanView;

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
