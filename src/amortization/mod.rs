//! Iterative debt paydown simulation

mod schedule;
mod simulator;

pub use schedule::{PayoffOutcome, PayoffSummary, ScheduleRow, SimulationResult};
pub use simulator::{AmortizationSimulator, PaymentRule};
