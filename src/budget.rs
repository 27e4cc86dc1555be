//! Percentage-based income split (needs / wants / savings)

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CalcError, CalcResult};

const PERCENT_TOLERANCE: f64 = 1e-9;

/// Shares of income, in percent, that must add up to 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRule {
    pub needs_percent: f64,
    pub wants_percent: f64,
    pub savings_percent: f64,
}

impl Default for BudgetRule {
    /// The 50/30/20 rule
    fn default() -> Self {
        Self {
            needs_percent: 50.0,
            wants_percent: 30.0,
            savings_percent: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSplit {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl BudgetRule {
    pub fn new(needs_percent: f64, wants_percent: f64, savings_percent: f64) -> CalcResult<Self> {
        let rule = Self {
            needs_percent,
            wants_percent,
            savings_percent,
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("needs_percent", self.needs_percent)?;
        ensure_non_negative("wants_percent", self.wants_percent)?;
        ensure_non_negative("savings_percent", self.savings_percent)?;

        let total = self.needs_percent + self.wants_percent + self.savings_percent;
        if (total - 100.0).abs() > PERCENT_TOLERANCE {
            return Err(CalcError::invalid(
                "budget_rule",
                format!("percentages must add up to 100, got {}", total),
            ));
        }
        Ok(())
    }

    pub fn split(&self, monthly_income: f64) -> CalcResult<BudgetSplit> {
        self.validate()?;
        let income = ensure_non_negative("monthly_income", monthly_income)?;
        Ok(BudgetSplit {
            needs: income * self.needs_percent / 100.0,
            wants: income * self.wants_percent / 100.0,
            savings: income * self.savings_percent / 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_split() {
        let split = BudgetRule::default().split(4000.0).unwrap();
        assert_relative_eq!(split.needs, 2000.0);
        assert_relative_eq!(split.wants, 1200.0);
        assert_relative_eq!(split.savings, 800.0);
    }

    #[test]
    fn test_custom_rule_must_total_100() {
        assert!(BudgetRule::new(60.0, 20.0, 20.0).is_ok());
        assert!(BudgetRule::new(60.0, 30.0, 20.0).unwrap_err().is_invalid_input());
        assert!(BudgetRule::new(-10.0, 90.0, 20.0).is_err());
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(BudgetRule::default().split(-1.0).is_err());
    }
}
