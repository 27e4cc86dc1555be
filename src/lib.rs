//! Fincalc - amortization and compound-growth engine for personal finance calculators
//!
//! This library provides:
//! - Closed-form level-payment solutions (loan EMI, payment to reach a savings target)
//! - Month-by-month debt paydown with explicit non-convergence reporting
//! - Baseline vs. extra-payment and negotiated-discount comparisons
//! - Savings goal projection and portfolio-level aggregation
//! - Emergency fund and budget split helpers
//!
//! Every operation is a pure function of its inputs; currency is a display
//! concern and never enters the arithmetic.

pub mod error;
pub mod config;
pub mod compounding;
pub mod annuity;
pub mod amortization;
pub mod scenario;
pub mod goals;
pub mod budget;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use config::EngineConfig;
pub use annuity::{AnnuitySolver, LoanInput, LoanSummary, Repayment, RequiredPayment};
pub use amortization::{AmortizationSimulator, PaymentRule, PayoffOutcome, SimulationResult};
pub use scenario::{apply_negotiated_discount, ComparisonResult, ScenarioComparator};
pub use goals::{Goal, GoalProjector, GoalResult, MultiGoalAggregator, PortfolioSummary, Priority};
pub use budget::{BudgetRule, BudgetSplit};
