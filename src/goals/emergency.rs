//! Emergency fund planning

use serde::{Deserialize, Serialize};

use super::goal::{Goal, Priority};
use crate::error::{ensure_non_negative, CalcError, CalcResult};

/// Savings needed to cover `months_of_coverage` months of expenses
pub fn emergency_fund_target(monthly_expenses: f64, months_of_coverage: u32) -> CalcResult<f64> {
    let expenses = ensure_non_negative("monthly_expenses", monthly_expenses)?;
    if months_of_coverage == 0 {
        return Err(CalcError::invalid("months_of_coverage", "must be at least 1"));
    }
    Ok(expenses * months_of_coverage as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundPlan {
    pub monthly_expenses: f64,
    pub months_of_coverage: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
}

impl EmergencyFundPlan {
    pub fn target(&self) -> CalcResult<f64> {
        emergency_fund_target(self.monthly_expenses, self.months_of_coverage)
    }

    /// Months of expenses the current savings already cover
    pub fn months_covered(&self) -> f64 {
        if self.monthly_expenses <= 0.0 {
            return 0.0;
        }
        self.current_savings / self.monthly_expenses
    }

    /// The plan as a high-priority savings goal
    pub fn to_goal(&self) -> CalcResult<Goal> {
        let goal = Goal::new(
            "Emergency fund",
            self.target()?,
            self.current_savings,
            self.monthly_contribution,
            self.annual_rate_percent,
        )
        .with_priority(Priority::High);
        goal.validate()?;
        Ok(goal)
    }
}
