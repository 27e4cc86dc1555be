//! Month-by-month debt paydown simulator

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::schedule::{PayoffOutcome, ScheduleRow, SimulationResult};
use crate::annuity::LoanInput;
use crate::compounding::{BalanceDirection, Compounder, PeriodStep};
use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_positive, CalcResult};

/// How much is paid each period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRule {
    /// The same amount every period
    Level { amount: f64 },
    /// Card-style minimum due: a percent of the current balance, never below
    /// `floor`, plus a fixed `extra` on top
    MinimumDue {
        percent_of_balance: f64,
        floor: f64,
        extra: f64,
    },
}

impl PaymentRule {
    pub fn level(amount: f64) -> Self {
        Self::Level { amount }
    }

    pub fn minimum_due(percent_of_balance: f64, floor: f64) -> Self {
        Self::MinimumDue {
            percent_of_balance,
            floor,
            extra: 0.0,
        }
    }

    /// Same rule with `extra` paid on top every period
    pub fn plus_extra(self, extra: f64) -> Self {
        match self {
            Self::Level { amount } => Self::Level {
                amount: amount + extra,
            },
            Self::MinimumDue {
                percent_of_balance,
                floor,
                extra: current,
            } => Self::MinimumDue {
                percent_of_balance,
                floor,
                extra: current + extra,
            },
        }
    }

    /// Amount due for a period that opens at `balance`
    pub fn payment_due(&self, balance: f64) -> f64 {
        match *self {
            Self::Level { amount } => amount,
            Self::MinimumDue {
                percent_of_balance,
                floor,
                extra,
            } => (balance * percent_of_balance / 100.0).max(floor) + extra,
        }
    }

    fn validate(&self) -> CalcResult<()> {
        match *self {
            Self::Level { amount } => {
                ensure_non_negative("payment", amount)?;
            }
            Self::MinimumDue {
                percent_of_balance,
                floor,
                extra,
            } => {
                ensure_non_negative("percent_of_balance", percent_of_balance)?;
                ensure_non_negative("minimum_floor", floor)?;
                ensure_non_negative("extra_payment", extra)?;
            }
        }
        Ok(())
    }
}

/// Debt paydown under periodic compounding, one period at a time
#[derive(Debug, Clone, Default)]
pub struct AmortizationSimulator {
    config: EngineConfig,
}

impl AmortizationSimulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulate a level `payment` against `principal` at `periodic_rate`
    pub fn simulate(&self, principal: f64, periodic_rate: f64, payment: f64) -> CalcResult<SimulationResult> {
        self.simulate_with_rule(principal, periodic_rate, PaymentRule::level(payment))
    }

    /// Simulate a loan record, resolving a term into its level payment first
    pub fn simulate_loan(&self, loan: &LoanInput) -> CalcResult<SimulationResult> {
        let payment = loan.monthly_payment(&self.config)?;
        self.simulate(loan.principal, loan.periodic_rate(&self.config), payment)
    }

    /// Simulate any payment rule
    pub fn simulate_with_rule(
        &self,
        principal: f64,
        periodic_rate: f64,
        rule: PaymentRule,
    ) -> CalcResult<SimulationResult> {
        let principal = ensure_positive("principal", principal)?;
        let periodic_rate = ensure_non_negative("periodic_rate", periodic_rate)?;
        rule.validate()?;

        debug!(
            "Simulating payoff: principal={:.2}, periodic_rate={:.6}, rule={:?}",
            principal, periodic_rate, rule
        );

        if principal <= self.config.payoff_epsilon {
            return Ok(SimulationResult::paid_off(principal));
        }

        let result = match rule {
            PaymentRule::Level { amount } if periodic_rate == 0.0 => self.run_linear(principal, amount),
            _ => self.run_compounding(principal, periodic_rate, rule),
        };

        match result.outcome {
            PayoffOutcome::Converged => debug!(
                "Paid off in {} months: total_paid={:.2}, interest={:.2}",
                result.months, result.total_paid, result.total_interest_paid
            ),
            outcome => warn!(
                "Payoff did not converge after {} months ({:?}); balance {:.2}",
                result.months, outcome, result.final_balance
            ),
        }

        Ok(result)
    }

    fn run_compounding(&self, principal: f64, periodic_rate: f64, rule: PaymentRule) -> SimulationResult {
        let compounder = Compounder::new(periodic_rate, BalanceDirection::Shrinking);
        let mut result = SimulationResult::paid_off(principal);
        let mut balance = principal;

        let outcome = loop {
            if balance <= self.config.payoff_epsilon {
                break PayoffOutcome::Converged;
            }
            if result.months >= self.config.max_periods {
                break PayoffOutcome::CappedAtMaxPeriods {
                    max_periods: self.config.max_periods,
                };
            }

            let Some(step) = compounder.step(balance, rule.payment_due(balance)) else {
                break PayoffOutcome::NonConvergent {
                    interest_charge: compounder.interest_on(balance),
                };
            };

            balance = step.closing_balance;
            self.record(&mut result, step);
        };

        result.outcome = outcome;
        result.final_balance = balance;
        result
    }

    /// Zero-rate paydown: exactly `ceil(principal / payment)` periods
    fn run_linear(&self, principal: f64, payment: f64) -> SimulationResult {
        let mut result = SimulationResult::paid_off(principal);

        if payment <= 0.0 {
            result.outcome = PayoffOutcome::NonConvergent { interest_charge: 0.0 };
            return result;
        }

        let needed = (principal / payment).ceil();
        let max_periods = self.config.max_periods;
        let periods = if needed > max_periods as f64 {
            max_periods
        } else {
            needed as u32
        };

        for period in 1..=periods {
            // Multiply rather than subtract repeatedly so no drift accumulates
            let opening_balance = principal - payment * (period - 1) as f64;
            let paid = if period as f64 == needed {
                opening_balance
            } else {
                payment.min(opening_balance)
            };
            self.record(
                &mut result,
                PeriodStep {
                    opening_balance,
                    interest: 0.0,
                    cash_flow: paid,
                    principal: paid,
                    closing_balance: opening_balance - paid,
                },
            );
        }

        if periods as f64 == needed {
            result.outcome = PayoffOutcome::Converged;
            result.total_paid = principal;
            result.final_balance = 0.0;
        } else {
            result.outcome = PayoffOutcome::CappedAtMaxPeriods { max_periods };
            result.total_paid = payment * periods as f64;
            result.final_balance = principal - result.total_paid;
        }
        result
    }

    fn record(&self, result: &mut SimulationResult, step: PeriodStep) {
        result.months += 1;
        result.total_paid += step.cash_flow;
        result.total_interest_paid += step.interest;

        trace!(
            "Month {}: opening={:.2} interest={:.2} principal={:.2} closing={:.2}",
            result.months, step.opening_balance, step.interest, step.principal, step.closing_balance
        );

        if self.config.record_schedule {
            result.schedule.push(ScheduleRow {
                period: result.months,
                opening_balance: step.opening_balance,
                interest: step.interest,
                principal: step.principal,
                payment: step.cash_flow,
                closing_balance: step.closing_balance,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::AnnuitySolver;
    use crate::error::CalcError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn simulator() -> AmortizationSimulator {
        AmortizationSimulator::new(EngineConfig::default())
    }

    #[test]
    fn test_closed_form_payment_pays_off_on_term() {
        let rate = 0.10 / 12.0;
        let payment = AnnuitySolver::payment_for_amortizing_loan(100_000.0, rate, 12).unwrap();
        let result = simulator().simulate(100_000.0, rate, payment).unwrap();

        assert_eq!(result.months_to_payoff(), Some(12));
        assert_abs_diff_eq!(result.final_balance, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_interest_paid, 5499.06, epsilon = 0.05);
    }

    #[test]
    fn test_totals_invariant() {
        let result = simulator().simulate(5000.0, 0.1899 / 12.0, 150.0).unwrap();
        assert!(result.is_converged());
        assert_abs_diff_eq!(
            result.total_interest_paid,
            result.total_paid - result.principal_repaid(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_last_payment_only_covers_remaining() {
        let sim = AmortizationSimulator::new(EngineConfig::detailed());
        let result = sim.simulate(1000.0, 0.01, 300.0).unwrap();

        assert_eq!(result.months, 4);
        let last = result.schedule.last().unwrap();
        assert!(last.payment < 300.0);
        assert_relative_eq!(last.payment, last.opening_balance + last.interest);
        let sum: f64 = result.schedule.iter().map(|r| r.payment).sum();
        assert_relative_eq!(sum, result.total_paid);
    }

    #[test]
    fn test_zero_rate_months_are_exact() {
        let result = simulator().simulate(1000.0, 0.0, 300.0).unwrap();
        assert_eq!(result.months_to_payoff(), Some(4));
        assert_eq!(result.total_interest_paid, 0.0);
        assert_eq!(result.total_paid, 1000.0);
        assert_eq!(result.final_balance, 0.0);
    }

    #[test]
    fn test_zero_rate_schedule_rows() {
        let sim = AmortizationSimulator::new(EngineConfig::detailed());
        let result = sim.simulate(1000.0, 0.0, 300.0).unwrap();
        let payments: Vec<f64> = result.schedule.iter().map(|r| r.payment).collect();
        assert_eq!(payments, vec![300.0, 300.0, 300.0, 100.0]);
        assert_eq!(result.schedule[3].closing_balance, 0.0);
    }

    #[test]
    fn test_payment_below_interest_is_non_convergent() {
        let result = simulator().simulate(5000.0, 0.24 / 12.0, 50.0).unwrap();
        assert_eq!(result.months_to_payoff(), None);
        assert_eq!(result.months, 0);
        match result.outcome {
            PayoffOutcome::NonConvergent { interest_charge } => {
                assert_relative_eq!(interest_charge, 100.0)
            }
            other => panic!("expected non-convergent outcome, got {:?}", other),
        }

        let err = result.require_payoff(50.0).unwrap_err();
        assert!(matches!(err, CalcError::NonConvergentPayoff { .. }));
    }

    #[test]
    fn test_zero_payment_at_zero_rate_is_non_convergent() {
        let result = simulator().simulate(1000.0, 0.0, 0.0).unwrap();
        assert!(matches!(result.outcome, PayoffOutcome::NonConvergent { .. }));
    }

    #[test]
    fn test_slow_payoff_hits_cap() {
        // Barely above interest: would take far longer than 50 years
        let result = simulator().simulate(10_000.0, 0.01, 100.1).unwrap();
        assert_eq!(result.outcome, PayoffOutcome::CappedAtMaxPeriods { max_periods: 600 });
        assert_eq!(result.months, 600);
        assert!(result.final_balance > 0.0);
        assert!(result.months_to_payoff().is_none());

        let remaining = result.final_balance;
        let err = result.require_payoff(100.1).unwrap_err();
        match &err {
            CalcError::PayoffCapped { max_periods, remaining_balance } => {
                assert_eq!(*max_periods, 600);
                assert_eq!(*remaining_balance, remaining);
            }
            other => panic!("expected capped payoff error, got {:?}", other),
        }
        assert!(err.to_string().contains("not paid off within 600 months"));
    }

    #[test]
    fn test_zero_rate_cap() {
        let result = simulator().simulate(100_000.0, 0.0, 100.0).unwrap();
        assert_eq!(result.outcome, PayoffOutcome::CappedAtMaxPeriods { max_periods: 600 });
        assert_relative_eq!(result.final_balance, 40_000.0);
    }

    #[test]
    fn test_balance_under_a_cent_is_paid_off() {
        let result = simulator().simulate(0.005, 0.01, 100.0).unwrap();
        assert_eq!(result.months_to_payoff(), Some(0));
        assert_eq!(result.total_paid, 0.0);
    }

    #[test]
    fn test_zero_principal_rejected() {
        let err = simulator().simulate(0.0, 0.01, 100.0).unwrap_err();
        assert!(err.is_invalid_input());
        let rule = PaymentRule::minimum_due(2.0, 25.0);
        assert!(simulator().simulate_with_rule(0.0, 0.01, rule).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(simulator().simulate(-1.0, 0.01, 100.0).unwrap_err().is_invalid_input());
        assert!(simulator().simulate(1000.0, -0.01, 100.0).unwrap_err().is_invalid_input());
        assert!(simulator().simulate(1000.0, 0.01, f64::NAN).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_simulate_loan_with_term() {
        let loan = LoanInput::with_term(12_000.0, 6.0, 24);
        let result = simulator().simulate_loan(&loan).unwrap();
        assert_eq!(result.months_to_payoff(), Some(24));
    }

    #[test]
    fn test_minimum_due_trap() {
        // 2% of balance with a $25 floor on an 18.99% card
        let rule = PaymentRule::minimum_due(2.0, 25.0);
        let result = simulator()
            .simulate_with_rule(5000.0, 0.1899 / 12.0, rule)
            .unwrap();

        assert!(result.is_converged());
        assert!(result.months > 120);
        assert!(result.total_interest_paid > 5000.0);
    }

    #[test]
    fn test_plus_extra() {
        assert_eq!(PaymentRule::level(150.0).plus_extra(50.0), PaymentRule::level(200.0));
        let rule = PaymentRule::minimum_due(2.0, 25.0).plus_extra(50.0);
        assert_relative_eq!(rule.payment_due(5000.0), 150.0);
        assert_relative_eq!(rule.payment_due(100.0), 75.0);
    }

    #[test]
    fn test_repeat_runs_identical() {
        let sim = AmortizationSimulator::new(EngineConfig::detailed());
        let a = sim.simulate(7500.0, 0.015, 220.0).unwrap();
        let b = sim.simulate(7500.0, 0.015, 220.0).unwrap();
        assert_eq!(a, b);
    }
}
