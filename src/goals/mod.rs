//! Savings goals: projection, aggregation and loading

mod goal;
mod projector;
mod aggregate;
mod emergency;
pub mod loader;

pub use goal::{Goal, GoalResult, Priority};
pub use projector::GoalProjector;
pub use aggregate::{MultiGoalAggregator, PortfolioSummary, PriorityTotals};
pub use emergency::{emergency_fund_target, EmergencyFundPlan};
pub use loader::{load_goals, load_goals_from_reader};
