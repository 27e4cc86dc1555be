//! Baseline-versus-alternative payoff comparisons
//!
//! Runs the amortization simulator twice (a baseline plan and an accelerated
//! or discounted one) and reports what the alternative saves.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationSimulator, PaymentRule, SimulationResult};
use crate::annuity::LoanInput;
use crate::config::EngineConfig;
use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

/// Two payoff runs side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline: SimulationResult,
    pub accelerated: SimulationResult,

    /// Baseline months minus accelerated months; `None` unless both pay off
    pub months_saved: Option<i64>,

    /// Baseline interest minus accelerated interest; `None` unless both pay off
    pub interest_saved: Option<f64>,

    /// Balance removed before paying starts (negotiated discounts)
    pub principal_saved: f64,
}

impl ComparisonResult {
    fn from_runs(baseline: SimulationResult, accelerated: SimulationResult) -> Self {
        let both_paid_off = baseline.is_converged() && accelerated.is_converged();
        let months_saved =
            both_paid_off.then(|| baseline.months as i64 - accelerated.months as i64);
        let interest_saved = both_paid_off
            .then(|| baseline.total_interest_paid - accelerated.total_interest_paid);
        let principal_saved = baseline.principal - accelerated.principal;

        Self {
            baseline,
            accelerated,
            months_saved,
            interest_saved,
            principal_saved,
        }
    }

    /// Total cash the alternative plan saves over the baseline
    pub fn total_paid_saved(&self) -> Option<f64> {
        self.interest_saved
            .map(|_| self.baseline.total_paid - self.accelerated.total_paid)
    }
}

/// Scale `principal` down by a negotiated percentage discount
///
/// `discount_percent` must be in `[0, 100)`: a full discount is forgiveness,
/// not a payoff scenario.
pub fn apply_negotiated_discount(principal: f64, discount_percent: f64) -> CalcResult<f64> {
    let principal = ensure_positive("principal", principal)?;
    let discount = ensure_non_negative("discount_percent", discount_percent)?;
    if discount >= 100.0 {
        return Err(CalcError::invalid(
            "discount_percent",
            format!("must be below 100, got {}", discount),
        ));
    }
    Ok(principal * (1.0 - discount / 100.0))
}

/// Compares payoff plans with a shared simulator
#[derive(Debug, Clone, Default)]
pub struct ScenarioComparator {
    simulator: AmortizationSimulator,
}

impl ScenarioComparator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            simulator: AmortizationSimulator::new(config),
        }
    }

    pub fn with_simulator(simulator: AmortizationSimulator) -> Self {
        Self { simulator }
    }

    pub fn simulator(&self) -> &AmortizationSimulator {
        &self.simulator
    }

    /// The loan's own payment against the same payment plus `extra_payment`
    pub fn compare_extra_payment(&self, loan: &LoanInput, extra_payment: f64) -> CalcResult<ComparisonResult> {
        let config = self.simulator.config();
        let base_payment = loan.monthly_payment(config)?;
        self.compare_payments(loan.principal, loan.annual_rate_percent, base_payment, extra_payment)
    }

    /// `base_payment` against `base_payment + extra_payment` on the same balance
    pub fn compare_payments(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        base_payment: f64,
        extra_payment: f64,
    ) -> CalcResult<ComparisonResult> {
        let extra = ensure_non_negative("extra_payment", extra_payment)?;
        let baseline = PaymentRule::level(base_payment);
        self.compare_rules(principal, annual_rate_percent, baseline, baseline.plus_extra(extra))
    }

    /// Any two payment rules on the same balance and rate
    pub fn compare_rules(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        baseline: PaymentRule,
        accelerated: PaymentRule,
    ) -> CalcResult<ComparisonResult> {
        let annual_rate_percent = ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
        let rate = self.simulator.config().periodic_rate(annual_rate_percent);

        let result = ComparisonResult::from_runs(
            self.simulator.simulate_with_rule(principal, rate, baseline)?,
            self.simulator.simulate_with_rule(principal, rate, accelerated)?,
        );

        debug!(
            "Compared {:?} vs {:?}: months_saved={:?}, interest_saved={:?}",
            baseline, accelerated, result.months_saved, result.interest_saved
        );
        Ok(result)
    }

    /// Original balance against the negotiated balance, same payment
    pub fn compare_negotiated_discount(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        payment: f64,
        discount_percent: f64,
    ) -> CalcResult<ComparisonResult> {
        let annual_rate_percent = ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
        let adjusted = apply_negotiated_discount(principal, discount_percent)?;
        let rate = self.simulator.config().periodic_rate(annual_rate_percent);

        Ok(ComparisonResult::from_runs(
            self.simulator.simulate(principal, rate, payment)?,
            self.simulator.simulate(adjusted, rate, payment)?,
        ))
    }
}
