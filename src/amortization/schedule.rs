//! Simulation output structures

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// One period of a payoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period number (1-indexed)
    pub period: u32,
    pub opening_balance: f64,
    pub interest: f64,
    pub principal: f64,
    /// Cash paid this period (principal + interest)
    pub payment: f64,
    pub closing_balance: f64,
}

/// How a simulation stopped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffOutcome {
    /// Balance reached zero (within epsilon)
    Converged,
    /// Payment does not cover the interest charged on the balance
    NonConvergent { interest_charge: f64 },
    /// Balance still outstanding after the period cap
    CappedAtMaxPeriods { max_periods: u32 },
}

/// Result of one debt paydown simulation; built fresh per call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub outcome: PayoffOutcome,

    /// Periods simulated before stopping
    pub months: u32,

    /// Original balance
    pub principal: f64,

    /// Sum of actual cash paid; the last period pays only what is owed
    pub total_paid: f64,

    pub total_interest_paid: f64,

    pub final_balance: f64,

    /// Per-period rows, only when schedule recording is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleRow>,
}

impl SimulationResult {
    /// Empty result for a balance that is already paid off
    pub fn paid_off(principal: f64) -> Self {
        Self {
            outcome: PayoffOutcome::Converged,
            months: 0,
            principal,
            total_paid: 0.0,
            total_interest_paid: 0.0,
            final_balance: principal,
            schedule: Vec::new(),
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self.outcome, PayoffOutcome::Converged)
    }

    /// Months to payoff, or `None` when the debt is never repaid
    pub fn months_to_payoff(&self) -> Option<u32> {
        self.is_converged().then_some(self.months)
    }

    /// Turn a run that never pays off into an error: `NonConvergentPayoff`
    /// when the payment misses the interest, `PayoffCapped` at the period cap
    pub fn require_payoff(self, payment: f64) -> CalcResult<Self> {
        match self.outcome {
            PayoffOutcome::Converged => Ok(self),
            PayoffOutcome::NonConvergent { interest_charge } => Err(CalcError::NonConvergentPayoff {
                payment,
                interest: interest_charge,
            }),
            PayoffOutcome::CappedAtMaxPeriods { max_periods } => Err(CalcError::PayoffCapped {
                max_periods,
                remaining_balance: self.final_balance,
            }),
        }
    }

    /// Principal actually repaid
    pub fn principal_repaid(&self) -> f64 {
        self.principal - self.final_balance
    }

    pub fn summary(&self) -> PayoffSummary {
        let interest_to_principal_ratio = if self.principal > 0.0 {
            self.total_interest_paid / self.principal
        } else {
            0.0
        };

        PayoffSummary {
            months_to_payoff: self.months_to_payoff(),
            years_to_payoff: self.months_to_payoff().map(|m| m as f64 / 12.0),
            total_paid: self.total_paid,
            total_interest_paid: self.total_interest_paid,
            interest_to_principal_ratio,
        }
    }
}

/// Display-oriented payoff figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub months_to_payoff: Option<u32>,
    pub years_to_payoff: Option<f64>,
    pub total_paid: f64,
    pub total_interest_paid: f64,
    pub interest_to_principal_ratio: f64,
}
