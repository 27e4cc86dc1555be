//! Forward and reverse projection of savings balances

use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;

use super::goal::{Goal, GoalResult};
use crate::annuity::{AnnuitySolver, RequiredPayment};
use crate::compounding::{BalanceDirection, Compounder};
use crate::config::EngineConfig;
use crate::error::{CalcError, CalcResult};

/// Compound-growth projector: the mirror image of the amortization simulator
#[derive(Debug, Clone, Default)]
pub struct GoalProjector {
    config: EngineConfig,
}

impl GoalProjector {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn compounder(&self, goal: &Goal) -> Compounder {
        Compounder::new(
            self.config.periodic_rate(goal.annual_rate_percent),
            BalanceDirection::Growing,
        )
    }

    /// Months of contributions until the balance reaches the target
    ///
    /// `None` when the target is not reached within the period cap.
    pub fn months_to_reach_goal(&self, goal: &Goal) -> CalcResult<Option<u32>> {
        goal.validate()?;

        if goal.is_achieved() {
            return Ok(Some(0));
        }

        let max_periods = self.config.max_periods;
        let compounder = self.compounder(goal);

        if compounder.periodic_rate() == 0.0 {
            if goal.monthly_contribution <= 0.0 {
                return Ok(None);
            }
            let months = (goal.remaining_amount() / goal.monthly_contribution).ceil();
            return Ok((months <= max_periods as f64).then_some(months as u32));
        }

        let mut balance = goal.current_amount;
        for month in 1..=max_periods {
            if let Some(step) = compounder.step(balance, goal.monthly_contribution) {
                balance = step.closing_balance;
            }
            if balance >= goal.target_amount {
                return Ok(Some(month));
            }
        }
        Ok(None)
    }

    /// Like [`months_to_reach_goal`](Self::months_to_reach_goal) but an
    /// unreachable goal is a `GoalUnreachable` error
    pub fn require_months_to_goal(&self, goal: &Goal) -> CalcResult<u32> {
        self.months_to_reach_goal(goal)?.ok_or(CalcError::GoalUnreachable {
            max_periods: self.config.max_periods,
        })
    }

    /// Whole months from `today` to `target_date`, never less than one
    pub fn months_until(&self, today: NaiveDate, target_date: NaiveDate) -> u32 {
        let days = (target_date - today).num_days() as f64;
        let months = (days / self.config.days_per_month).floor();
        if months < 1.0 {
            1
        } else {
            months.min(u32::MAX as f64) as u32
        }
    }

    /// Level monthly amount that reaches the target on `target_date`
    pub fn required_monthly_for_date(
        &self,
        goal: &Goal,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> CalcResult<RequiredPayment> {
        goal.validate()?;
        AnnuitySolver::payment_for_future_value(
            goal.current_amount,
            goal.target_amount,
            self.config.periodic_rate(goal.annual_rate_percent),
            self.months_until(today, target_date),
        )
    }

    /// Balance after `months` of interest and contributions
    ///
    /// `months` may not exceed the period cap.
    pub fn project_balance(&self, goal: &Goal, months: u32) -> CalcResult<f64> {
        goal.validate()?;
        if months > self.config.max_periods {
            return Err(CalcError::invalid(
                "months",
                format!("must be at most {}, got {}", self.config.max_periods, months),
            ));
        }

        let compounder = self.compounder(goal);
        Ok((0..months).fold(goal.current_amount, |balance, _| {
            compounder
                .step(balance, goal.monthly_contribution)
                .map_or(balance, |step| step.closing_balance)
        }))
    }

    /// Every derived figure for one goal, as of `today`
    pub fn project(&self, goal: &Goal, today: NaiveDate) -> CalcResult<GoalResult> {
        let months_to_goal = self.months_to_reach_goal(goal)?;

        let required_monthly_for_date = match goal.target_date {
            Some(date) => Some(self.required_monthly_for_date(goal, date, today)?),
            None => None,
        };

        // The required payment above uses the full month count; the projection
        // itself stops at the period cap
        let horizon_months = match (goal.target_date, months_to_goal) {
            (Some(date), _) => self.months_until(today, date).min(self.config.max_periods),
            (None, Some(months)) => months,
            (None, None) => self.config.max_periods,
        };

        let projected_final_amount = self.project_balance(goal, horizon_months)?;
        let total_contributions = goal.monthly_contribution * horizon_months as f64;

        let result = GoalResult {
            name: goal.name.clone(),
            remaining_amount: goal.remaining_amount(),
            months_to_goal,
            required_monthly_for_date,
            horizon_months,
            projected_final_amount,
            total_contributions,
            interest_earned: projected_final_amount - goal.current_amount - total_contributions,
            percent_complete: goal.percent_complete(),
        };

        debug!(
            "Projected goal '{}': months_to_goal={:?}, horizon={}, final={:.2}",
            goal.name, result.months_to_goal, result.horizon_months, result.projected_final_amount
        );
        Ok(result)
    }

    /// Goals are independent, so they project in parallel; output order matches input
    pub fn project_all(&self, goals: &[Goal], today: NaiveDate) -> CalcResult<Vec<GoalResult>> {
        goals.par_iter().map(|goal| self.project(goal, today)).collect()
    }
}
