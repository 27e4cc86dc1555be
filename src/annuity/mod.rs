//! Closed-form annuity formulas and loan inputs

mod solver;
mod loan;

pub use solver::{AnnuitySolver, LoanSummary, RequiredPayment};
pub use loan::{LoanInput, Repayment};
