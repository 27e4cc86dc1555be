//! One-period balance step shared by debt paydown and savings growth
//!
//! Both the amortization simulator and the goal projector advance a balance
//! one period at a time: interest accrues on the opening balance, then a level
//! cash flow either reduces it (payment) or adds to it (contribution).

/// Which way the cash flow moves the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDirection {
    /// Debt: payments reduce the balance
    Shrinking,
    /// Savings: contributions add to the balance
    Growing,
}

/// Result of advancing a balance by one period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodStep {
    pub opening_balance: f64,
    pub interest: f64,
    /// Cash actually paid in (contribution) or out (payment) this period
    pub cash_flow: f64,
    /// Portion of a payment applied to principal; zero when growing
    pub principal: f64,
    pub closing_balance: f64,
}

/// Periodic compounding at a fixed per-period rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compounder {
    periodic_rate: f64,
    direction: BalanceDirection,
}

impl Compounder {
    pub fn new(periodic_rate: f64, direction: BalanceDirection) -> Self {
        Self {
            periodic_rate,
            direction,
        }
    }

    pub fn periodic_rate(&self) -> f64 {
        self.periodic_rate
    }

    pub fn direction(&self) -> BalanceDirection {
        self.direction
    }

    /// Interest charged (or earned) on a balance for one period
    pub fn interest_on(&self, balance: f64) -> f64 {
        balance * self.periodic_rate
    }

    /// Advance `balance` by one period with a level `flow`.
    ///
    /// For a shrinking balance, returns `None` when the flow does not cover the
    /// period's interest: the balance would never fall. The final payment is
    /// capped at the remaining balance plus that period's interest.
    pub fn step(&self, balance: f64, flow: f64) -> Option<PeriodStep> {
        let interest = self.interest_on(balance);
        match self.direction {
            BalanceDirection::Shrinking => {
                let principal = (flow - interest).min(balance);
                if principal <= 0.0 {
                    return None;
                }
                Some(PeriodStep {
                    opening_balance: balance,
                    interest,
                    cash_flow: principal + interest,
                    principal,
                    closing_balance: balance - principal,
                })
            }
            BalanceDirection::Growing => Some(PeriodStep {
                opening_balance: balance,
                interest,
                cash_flow: flow,
                principal: 0.0,
                closing_balance: balance + interest + flow,
            }),
        }
    }
}
