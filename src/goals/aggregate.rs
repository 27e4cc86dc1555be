//! Portfolio-level totals across independent goals

use serde::{Deserialize, Serialize};

use super::goal::{Goal, GoalResult, Priority};

/// Monthly contribution totals split by goal priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityTotals {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl PriorityTotals {
    fn add(&mut self, priority: Priority, amount: f64) {
        match priority {
            Priority::High => self.high += amount,
            Priority::Medium => self.medium += amount,
            Priority::Low => self.low += amount,
        }
    }
}

/// Dashboard summary of all goals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub goal_count: usize,
    pub total_target: f64,
    pub total_current: f64,
    pub total_remaining: f64,
    pub total_monthly_contribution: f64,
    pub total_projected: f64,
    pub total_interest_earned: f64,
    /// `total_current / total_target × 100`, or 0 with no target
    pub overall_percent: f64,
    pub completed_goals: usize,
    pub unreachable_goals: usize,
    pub contribution_by_priority: PriorityTotals,
}

/// Single-pass reduction over goal/result pairs
pub struct MultiGoalAggregator;

impl MultiGoalAggregator {
    pub fn summarize<'a, I>(pairs: I) -> PortfolioSummary
    where
        I: IntoIterator<Item = (&'a Goal, &'a GoalResult)>,
    {
        let mut summary = pairs
            .into_iter()
            .fold(PortfolioSummary::default(), |mut acc, (goal, result)| {
                acc.goal_count += 1;
                acc.total_target += goal.target_amount;
                acc.total_current += goal.current_amount;
                acc.total_remaining += result.remaining_amount;
                acc.total_monthly_contribution += goal.monthly_contribution;
                acc.total_projected += result.projected_final_amount;
                acc.total_interest_earned += result.interest_earned;
                acc.contribution_by_priority
                    .add(goal.priority, goal.monthly_contribution);
                if goal.is_achieved() {
                    acc.completed_goals += 1;
                }
                if !result.is_reachable() {
                    acc.unreachable_goals += 1;
                }
                acc
            });

        summary.overall_percent = if summary.total_target > 0.0 {
            summary.total_current / summary.total_target * 100.0
        } else {
            0.0
        };
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalProjector;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = MultiGoalAggregator::summarize(std::iter::empty());
        assert_eq!(summary, PortfolioSummary::default());
        assert_eq!(summary.overall_percent, 0.0);
    }

    #[test]
    fn test_three_goal_totals() {
        let goals = vec![
            Goal::new("Vacation", 10_000.0, 2500.0, 500.0, 4.5).with_priority(Priority::High),
            Goal::new("Car", 5000.0, 1000.0, 200.0, 0.0),
            Goal::new("Laptop", 3000.0, 3000.0, 0.0, 0.0).with_priority(Priority::Low),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let results = GoalProjector::default().project_all(&goals, today).unwrap();

        let summary = MultiGoalAggregator::summarize(goals.iter().zip(&results));
        assert_eq!(summary.goal_count, 3);
        assert_eq!(summary.total_current, 6500.0);
        assert_eq!(summary.total_target, 18_000.0);
        assert_eq!(summary.total_remaining, 11_500.0);
        assert_abs_diff_eq!(summary.overall_percent, 36.11, epsilon = 0.01);
        assert_eq!(summary.completed_goals, 1);
        assert_eq!(summary.unreachable_goals, 0);
        assert_eq!(summary.contribution_by_priority.high, 500.0);
        assert_eq!(summary.contribution_by_priority.medium, 200.0);
        assert_eq!(summary.contribution_by_priority.low, 0.0);
    }
}
