//! Error types shared by every calculator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Payment of {payment:.2} does not cover periodic interest of {interest:.2}")]
    NonConvergentPayoff { payment: f64, interest: f64 },

    #[error("Debt not paid off within {max_periods} months; {remaining_balance:.2} still owed")]
    PayoffCapped { max_periods: u32, remaining_balance: f64 },

    #[error("Goal not reachable within {max_periods} months")]
    GoalUnreachable { max_periods: u32 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date '{value}': {source}")]
    Date {
        value: String,
        source: chrono::ParseError,
    },
}

pub type CalcResult<T> = Result<T, CalcError>;

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors the caller should surface as "please check your inputs"
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Reject NaN and infinities
pub fn ensure_finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, format!("must be a finite number, got {}", value)))
    }
}

pub fn ensure_non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(value)
}

pub fn ensure_positive(field: &'static str, value: f64) -> CalcResult<f64> {
    let value = ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("must be greater than zero, got {}", value)));
    }
    Ok(value)
}
