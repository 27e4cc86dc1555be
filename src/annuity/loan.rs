//! Loan input record

use serde::{Deserialize, Serialize};

use super::AnnuitySolver;
use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

/// How a loan is repaid: over a fixed term, or at a fixed payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repayment {
    /// Level payment solved from the term
    Term { months: u32 },
    /// Caller-chosen level payment per period
    Payment { amount: f64 },
}

/// Immutable input for one loan calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub repayment: Repayment,
}

impl LoanInput {
    pub fn with_term(principal: f64, annual_rate_percent: f64, months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            repayment: Repayment::Term { months },
        }
    }

    pub fn with_payment(principal: f64, annual_rate_percent: f64, amount: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            repayment: Repayment::Payment { amount },
        }
    }

    /// Check principal, rate and repayment are usable
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("principal", self.principal)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        match self.repayment {
            Repayment::Term { months: 0 } => {
                Err(CalcError::invalid("term_months", "must be at least 1"))
            }
            Repayment::Term { .. } => Ok(()),
            Repayment::Payment { amount } => ensure_positive("payment", amount).map(|_| ()),
        }
    }

    pub fn periodic_rate(&self, config: &EngineConfig) -> f64 {
        config.periodic_rate(self.annual_rate_percent)
    }

    /// The level payment per period, solving the term variant in closed form
    pub fn monthly_payment(&self, config: &EngineConfig) -> CalcResult<f64> {
        self.validate()?;
        match self.repayment {
            Repayment::Term { months } => AnnuitySolver::payment_for_amortizing_loan(
                self.principal,
                self.periodic_rate(config),
                months,
            ),
            Repayment::Payment { amount } => Ok(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_term_resolves_to_emi() {
        let loan = LoanInput::with_term(100_000.0, 10.0, 12);
        let payment = loan.monthly_payment(&EngineConfig::default()).unwrap();
        assert_abs_diff_eq!(payment, 8791.59, epsilon = 0.01);
    }

    #[test]
    fn test_payment_passes_through() {
        let loan = LoanInput::with_payment(5000.0, 18.99, 150.0);
        assert_eq!(loan.monthly_payment(&EngineConfig::default()).unwrap(), 150.0);
    }

    #[test]
    fn test_validation() {
        assert!(LoanInput::with_term(0.0, 5.0, 12).validate().is_err());
        assert!(LoanInput::with_term(1000.0, -1.0, 12).validate().is_err());
        assert!(LoanInput::with_term(1000.0, 5.0, 0).validate().is_err());
        assert!(LoanInput::with_payment(1000.0, 5.0, 0.0).validate().is_err());
        assert!(LoanInput::with_payment(1000.0, f64::NAN, 50.0).validate().is_err());
        assert!(LoanInput::with_payment(1000.0, 0.0, 50.0).validate().is_ok());
    }

    #[test]
    fn test_serde_shape() {
        let loan: LoanInput = serde_json::from_str(
            r#"{"principal": 2000, "annual_rate_percent": 6, "repayment": {"term": {"months": 24}}}"#,
        )
        .unwrap();
        assert_eq!(loan.repayment, Repayment::Term { months: 24 });
    }
}
