use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("rate bounds [{lower}, {upper}] do not bracket a root: f(lower) = {value_at_lower}, f(upper) = {value_at_upper}")]
    NonBracketingRoot {
        lower: f64,
        upper: f64,
        value_at_lower: f64,
        value_at_upper: f64,
    },

    #[error("degenerate periodic rate {rate}: level payment is not finite")]
    DegenerateRate {
        rate: f64,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoanError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
