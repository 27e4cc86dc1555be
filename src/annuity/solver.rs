//! Closed-form level-payment formulas

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

/// Rates below this are treated as zero to avoid dividing by ~0
const ZERO_RATE_TOLERANCE: f64 = 1e-12;

/// Outcome of solving for the payment that reaches a future value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RequiredPayment {
    /// Level payment per period (zero when growth alone reaches the target)
    Payment(f64),
    /// The present value already meets the target
    AlreadyAchieved,
}

impl RequiredPayment {
    /// Payment amount, with an achieved goal needing nothing further
    pub fn amount(&self) -> f64 {
        match self {
            Self::Payment(amount) => *amount,
            Self::AlreadyAchieved => 0.0,
        }
    }

    pub fn is_achieved(&self) -> bool {
        matches!(self, Self::AlreadyAchieved)
    }
}

/// Payment, total paid and total interest of a fully amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Closed-form annuity solutions; O(1), no iteration
pub struct AnnuitySolver;

impl AnnuitySolver {
    /// Level payment that amortizes `principal` over `num_periods`
    ///
    /// `payment = P·r·(1+r)^n / ((1+r)^n − 1)`, degrading to `P / n` at zero rate.
    pub fn payment_for_amortizing_loan(
        principal: f64,
        periodic_rate: f64,
        num_periods: u32,
    ) -> CalcResult<f64> {
        let principal = ensure_positive("principal", principal)?;
        let rate = ensure_non_negative("periodic_rate", periodic_rate)?;
        let n = ensure_periods(num_periods)?;

        if rate < ZERO_RATE_TOLERANCE {
            return Ok(principal / n);
        }

        let growth = (1.0 + rate).powf(n);
        Ok(principal * rate * growth / (growth - 1.0))
    }

    /// Level payment that grows `present_value` to `future_value` in `num_periods`
    ///
    /// Solves `FV = PV·(1+r)^n + PMT·((1+r)^n − 1)/r` for PMT. A negative
    /// solution (growth alone suffices) is clamped to zero.
    pub fn payment_for_future_value(
        present_value: f64,
        future_value: f64,
        periodic_rate: f64,
        num_periods: u32,
    ) -> CalcResult<RequiredPayment> {
        let present_value = ensure_non_negative("present_value", present_value)?;
        let future_value = ensure_non_negative("future_value", future_value)?;
        let rate = ensure_non_negative("periodic_rate", periodic_rate)?;
        let n = ensure_periods(num_periods)?;

        if present_value >= future_value {
            return Ok(RequiredPayment::AlreadyAchieved);
        }

        let payment = if rate < ZERO_RATE_TOLERANCE {
            (future_value - present_value) / n
        } else {
            let growth = (1.0 + rate).powf(n);
            (future_value - present_value * growth) * rate / (growth - 1.0)
        };

        Ok(RequiredPayment::Payment(payment.max(0.0)))
    }

    /// Balance after `num_periods` of compounding with a level end-of-period contribution
    pub fn future_value(
        present_value: f64,
        contribution: f64,
        periodic_rate: f64,
        num_periods: u32,
    ) -> CalcResult<f64> {
        let present_value = ensure_non_negative("present_value", present_value)?;
        let contribution = ensure_non_negative("contribution", contribution)?;
        let rate = ensure_non_negative("periodic_rate", periodic_rate)?;
        let n = num_periods as f64;

        if rate < ZERO_RATE_TOLERANCE {
            return Ok(present_value + contribution * n);
        }

        let growth = (1.0 + rate).powf(n);
        Ok(present_value * growth + contribution * (growth - 1.0) / rate)
    }

    /// Payment and lifetime totals for a loan quoted with an annual percentage rate
    pub fn loan_summary(
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
        config: &EngineConfig,
    ) -> CalcResult<LoanSummary> {
        let annual_rate_percent = ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
        let payment = Self::payment_for_amortizing_loan(
            principal,
            config.periodic_rate(annual_rate_percent),
            term_months,
        )?;
        let total_paid = payment * term_months as f64;

        Ok(LoanSummary {
            payment,
            total_paid,
            total_interest: total_paid - principal,
        })
    }
}

fn ensure_periods(num_periods: u32) -> CalcResult<f64> {
    if num_periods == 0 {
        return Err(CalcError::invalid("num_periods", "must be at least 1"));
    }
    Ok(num_periods as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_emi_reference_value() {
        // 100k at 10% over 12 months
        let payment = AnnuitySolver::payment_for_amortizing_loan(100_000.0, 0.10 / 12.0, 12).unwrap();
        assert_abs_diff_eq!(payment, 8791.59, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let payment = AnnuitySolver::payment_for_amortizing_loan(1200.0, 0.0, 12).unwrap();
        assert_relative_eq!(payment, 100.0);
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = AnnuitySolver::payment_for_amortizing_loan(1000.0, 0.01, 0).unwrap_err();
        assert!(err.is_invalid_input());

        let err = AnnuitySolver::payment_for_future_value(0.0, 1000.0, 0.01, 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(AnnuitySolver::payment_for_amortizing_loan(-1.0, 0.01, 12).is_err());
        assert!(AnnuitySolver::payment_for_amortizing_loan(1000.0, -0.01, 12).is_err());
        assert!(AnnuitySolver::payment_for_amortizing_loan(f64::NAN, 0.01, 12).is_err());
        let zero = AnnuitySolver::payment_for_amortizing_loan(0.0, 0.01, 12).unwrap_err();
        assert!(zero.is_invalid_input());
    }

    #[test]
    fn test_future_value_target_round_trips() {
        let rate = 0.045 / 12.0;
        let required = AnnuitySolver::payment_for_future_value(2500.0, 10_000.0, rate, 24).unwrap();
        let pmt = required.amount();
        assert!(pmt > 0.0);

        let fv = AnnuitySolver::future_value(2500.0, pmt, rate, 24).unwrap();
        assert_abs_diff_eq!(fv, 10_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_future_value_target_zero_rate() {
        let required = AnnuitySolver::payment_for_future_value(1000.0, 4000.0, 0.0, 10).unwrap();
        assert_eq!(required, RequiredPayment::Payment(300.0));
    }

    #[test]
    fn test_goal_already_met() {
        let required = AnnuitySolver::payment_for_future_value(5000.0, 5000.0, 0.01, 12).unwrap();
        assert!(required.is_achieved());
        assert_eq!(required.amount(), 0.0);
    }

    #[test]
    fn test_growth_alone_clamps_to_zero() {
        // 9000 at 1%/month for 24 months exceeds 10000 without contributions
        let required = AnnuitySolver::payment_for_future_value(9000.0, 10_000.0, 0.01, 24).unwrap();
        assert_eq!(required, RequiredPayment::Payment(0.0));
    }

    #[test]
    fn test_loan_summary_totals() {
        let config = EngineConfig::default();
        let summary = AnnuitySolver::loan_summary(100_000.0, 10.0, 12, &config).unwrap();
        assert_relative_eq!(summary.total_paid, summary.payment * 12.0);
        assert_abs_diff_eq!(summary.total_interest, 5499.08, epsilon = 0.1);
    }
}
