//! Savings goal records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::annuity::RequiredPayment;
use crate::error::{ensure_non_negative, CalcError, CalcResult};

/// Goal priority as chosen on the goal-tracking page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" | "" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(CalcError::invalid("priority", format!("unknown priority '{}'", other))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.pad(label)
    }
}

/// A savings goal; owned by the caller, only read by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        current_amount: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
    ) -> Self {
        Self {
            name: name.into(),
            target_amount,
            current_amount,
            monthly_contribution,
            annual_rate_percent,
            target_date: None,
            priority: Priority::default(),
        }
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("target_amount", self.target_amount)?;
        ensure_non_negative("current_amount", self.current_amount)?;
        ensure_non_negative("monthly_contribution", self.monthly_contribution)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        Ok(())
    }

    pub fn is_achieved(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    /// Progress toward the target, capped at 100
    pub fn percent_complete(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 100.0;
        }
        (self.current_amount / self.target_amount * 100.0).min(100.0)
    }
}

/// Figures derived from one goal; rebuilt on every recalculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    pub name: String,
    pub remaining_amount: f64,

    /// Months of contributions until the target is met; `None` if unreachable
    pub months_to_goal: Option<u32>,

    /// Level monthly amount needed to hit the target date, when one is set
    pub required_monthly_for_date: Option<RequiredPayment>,

    /// Months the projection below covers
    pub horizon_months: u32,

    pub projected_final_amount: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,
    pub percent_complete: f64,
}

impl GoalResult {
    pub fn is_reachable(&self) -> bool {
        self.months_to_goal.is_some()
    }

    /// True when current contributions meet the target date
    pub fn on_track(&self, goal: &Goal) -> Option<bool> {
        self.required_monthly_for_date
            .map(|required| goal.monthly_contribution >= required.amount())
    }
}
