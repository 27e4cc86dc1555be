//! Fincalc CLI
//!
//! Command-line driver for the calculator engine

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use fincalc::amortization::{PayoffOutcome, SimulationResult};
use fincalc::goals::{load_goals, EmergencyFundPlan};
use fincalc::{
    AnnuitySolver, BudgetRule, ComparisonResult, EngineConfig, Goal,
    GoalProjector, LoanInput, MultiGoalAggregator, PaymentRule, Priority, ScenarioComparator,
};

#[derive(Parser, Debug)]
#[command(name = "fincalc", version, about = "Loan payoff and savings goal calculators")]
struct Cli {
    /// JSON engine config (missing fields take defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Level monthly payment (EMI) for a loan term
    Emi {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Payoff time and interest for a fixed monthly payment
    Payoff {
        #[command(flatten)]
        debt: DebtArgs,
        #[arg(long)]
        payment: f64,
        /// Extra paid on top each month; compares against the plain payment
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
        /// Print the month-by-month schedule
        #[arg(long)]
        schedule: bool,
    },
    /// Card minimum-due payoff against the same plan with an extra payment
    Minimum {
        #[command(flatten)]
        debt: DebtArgs,
        /// Minimum due as percent of balance
        #[arg(long, default_value_t = 2.0)]
        percent: f64,
        /// Lowest minimum payment
        #[arg(long, default_value_t = 25.0)]
        floor: f64,
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
    },
    /// Payoff before and after a negotiated discount
    Discount {
        #[command(flatten)]
        debt: DebtArgs,
        #[arg(long)]
        payment: f64,
        /// Discount in percent, below 100
        #[arg(long)]
        discount: f64,
    },
    /// Project a single savings goal
    Goal {
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        #[arg(long)]
        contribution: f64,
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        target_date: Option<NaiveDate>,
        #[command(flatten)]
        today: TodayArg,
    },
    /// Project every goal in a CSV file and summarize the portfolio
    Goals {
        csv: PathBuf,
        #[command(flatten)]
        today: TodayArg,
    },
    /// Emergency fund target and time to reach it
    Emergency {
        #[arg(long)]
        expenses: f64,
        #[arg(long, default_value_t = 6)]
        months: u32,
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        #[arg(long)]
        contribution: f64,
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
    },
    /// Split monthly income by a needs/wants/savings rule
    Budget {
        #[arg(long)]
        income: f64,
        #[arg(long, default_value_t = 50.0)]
        needs: f64,
        #[arg(long, default_value_t = 30.0)]
        wants: f64,
        #[arg(long, default_value_t = 20.0)]
        savings: f64,
    },
}

#[derive(Args, Debug)]
struct DebtArgs {
    #[arg(long)]
    balance: f64,
    /// Annual rate in percent
    #[arg(long)]
    rate: f64,
}

#[derive(Args, Debug)]
struct TodayArg {
    /// Date to project from, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl TodayArg {
    fn resolve(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match &cli.command {
        Command::Emi { principal, rate, months } => {
            let summary = AnnuitySolver::loan_summary(*principal, *rate, *months, &config)
                .context("Invalid loan inputs")?;
            if cli.json {
                return print_json(&summary);
            }
            println!("Monthly payment: {:.2}", summary.payment);
            println!("Total paid:      {:.2}", summary.total_paid);
            println!("Total interest:  {:.2}", summary.total_interest);
        }
        Command::Payoff { debt, payment, extra, schedule } => {
            let config = EngineConfig {
                record_schedule: *schedule,
                ..config
            };
            let comparator = ScenarioComparator::new(config);
            let loan = LoanInput::with_payment(debt.balance, debt.rate, *payment);
            let comparison = comparator
                .compare_extra_payment(&loan, *extra)
                .context("Invalid payoff inputs")?;
            if cli.json {
                return print_json(&comparison);
            }
            print_simulation("Payoff", &comparison.baseline);
            if *extra > 0.0 {
                print_comparison(&comparison);
            }
            if *schedule {
                print_schedule(&comparison.baseline);
            }
        }
        Command::Minimum { debt, percent, floor, extra } => {
            let comparator = ScenarioComparator::new(config);
            let rule = PaymentRule::minimum_due(*percent, *floor);
            let comparison = comparator
                .compare_rules(debt.balance, debt.rate, rule, rule.plus_extra(*extra))
                .context("Invalid minimum payment inputs")?;
            if cli.json {
                return print_json(&comparison);
            }
            print_simulation("Minimum payments", &comparison.baseline);
            if *extra > 0.0 {
                print_comparison(&comparison);
            }
        }
        Command::Discount { debt, payment, discount } => {
            let comparator = ScenarioComparator::new(config);
            let comparison = comparator
                .compare_negotiated_discount(debt.balance, debt.rate, *payment, *discount)
                .context("Invalid discount inputs")?;
            if cli.json {
                return print_json(&comparison);
            }
            println!("Negotiated balance: {:.2}", comparison.accelerated.principal);
            println!("Principal saved:    {:.2}", comparison.principal_saved);
            print_simulation("Original balance", &comparison.baseline);
            print_comparison(&comparison);
        }
        Command::Goal { target, current, contribution, rate, target_date, today } => {
            let mut goal = Goal::new("Savings goal", *target, *current, *contribution, *rate);
            if let Some(date) = target_date {
                goal = goal.with_target_date(*date);
            }
            let projector = GoalProjector::new(config);
            let result = projector
                .project(&goal, today.resolve())
                .context("Invalid goal inputs")?;
            if cli.json {
                return print_json(&result);
            }
            println!("Remaining:        {:.2}", result.remaining_amount);
            println!("Complete:         {:.1}%", result.percent_complete);
            match result.months_to_goal {
                Some(months) => println!("Months to goal:   {}", months),
                None => println!("Months to goal:   not reachable, try a higher contribution"),
            }
            if let Some(required) = result.required_monthly_for_date {
                println!("Needed per month: {:.2}", required.amount());
            }
            println!(
                "Projected after {} months: {:.2} (interest {:.2})",
                result.horizon_months, result.projected_final_amount, result.interest_earned
            );
        }
        Command::Goals { csv, today } => {
            let goals = load_goals(csv)
                .with_context(|| format!("Failed to load goals from {}", csv.display()))?;
            let projector = GoalProjector::new(config);
            let results = projector.project_all(&goals, today.resolve())?;
            let summary = MultiGoalAggregator::summarize(goals.iter().zip(&results));
            if cli.json {
                return print_json(&serde_json::json!({ "goals": results, "summary": summary }));
            }

            println!(
                "{:<20} {:>8} {:>12} {:>12} {:>8} {:>10}",
                "Goal", "Priority", "Target", "Current", "Done%", "Months"
            );
            println!("{}", "-".repeat(75));
            for (goal, result) in goals.iter().zip(&results) {
                let months = result
                    .months_to_goal
                    .map_or_else(|| "never".to_string(), |m| m.to_string());
                println!(
                    "{:<20} {:>8} {:>12.2} {:>12.2} {:>8.1} {:>10}",
                    goal.name, goal.priority, goal.target_amount, goal.current_amount,
                    result.percent_complete, months
                );
            }
            println!("\nPortfolio:");
            println!("  Total target:  {:.2}", summary.total_target);
            println!("  Total saved:   {:.2}", summary.total_current);
            println!("  Overall:       {:.1}%", summary.overall_percent);
            println!("  Monthly:       {:.2}", summary.total_monthly_contribution);
            println!(
                "  Completed: {}  Unreachable: {}",
                summary.completed_goals, summary.unreachable_goals
            );
            for priority in [Priority::High, Priority::Medium, Priority::Low] {
                let amount = match priority {
                    Priority::High => summary.contribution_by_priority.high,
                    Priority::Medium => summary.contribution_by_priority.medium,
                    Priority::Low => summary.contribution_by_priority.low,
                };
                println!("  {:<6} priority monthly: {:.2}", priority, amount);
            }
        }
        Command::Emergency { expenses, months, current, contribution, rate } => {
            let plan = EmergencyFundPlan {
                monthly_expenses: *expenses,
                months_of_coverage: *months,
                current_savings: *current,
                monthly_contribution: *contribution,
                annual_rate_percent: *rate,
            };
            let goal = plan.to_goal().context("Invalid emergency fund inputs")?;
            let months_to_goal = GoalProjector::new(config).months_to_reach_goal(&goal)?;
            if cli.json {
                return print_json(&serde_json::json!({
                    "target": goal.target_amount,
                    "months_covered": plan.months_covered(),
                    "months_to_goal": months_to_goal,
                }));
            }
            println!("Emergency fund target: {:.2}", goal.target_amount);
            println!("Currently covers:      {:.1} months", plan.months_covered());
            match months_to_goal {
                Some(m) => println!("Fully funded in:       {} months", m),
                None => println!("Fully funded in:       not reachable at this contribution"),
            }
        }
        Command::Budget { income, needs, wants, savings } => {
            let split = BudgetRule::new(*needs, *wants, *savings)
                .and_then(|rule| rule.split(*income))
                .context("Invalid budget inputs")?;
            if cli.json {
                return print_json(&split);
            }
            println!("Needs:   {:.2}", split.needs);
            println!("Wants:   {:.2}", split.wants);
            println!("Savings: {:.2}", split.savings);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_simulation(label: &str, result: &SimulationResult) {
    println!("{}:", label);
    match result.outcome {
        PayoffOutcome::Converged => {
            let summary = result.summary();
            println!("  Months to payoff: {}", result.months);
            if let Some(years) = summary.years_to_payoff {
                println!("  Years to payoff:  {:.1}", years);
            }
            println!("  Total paid:       {:.2}", result.total_paid);
            println!("  Total interest:   {:.2}", result.total_interest_paid);
        }
        PayoffOutcome::NonConvergent { interest_charge } => {
            println!(
                "  Payment never covers the monthly interest of {:.2}; the balance will not go down",
                interest_charge
            );
        }
        PayoffOutcome::CappedAtMaxPeriods { max_periods } => {
            println!(
                "  Still owing {:.2} after {} months; raise the payment",
                result.final_balance, max_periods
            );
        }
    }
}

fn print_comparison(comparison: &ComparisonResult) {
    match (comparison.months_saved, comparison.interest_saved) {
        (Some(months), Some(interest)) => {
            println!("  Months saved:     {}", months);
            println!("  Interest saved:   {:.2}", interest);
        }
        _ => println!("  Savings not comparable: one plan never pays off"),
    }
}

fn print_schedule(result: &SimulationResult) {
    println!(
        "\n{:>5} {:>12} {:>10} {:>10} {:>10} {:>12}",
        "Month", "Opening", "Interest", "Principal", "Payment", "Closing"
    );
    println!("{}", "-".repeat(64));
    for row in &result.schedule {
        println!(
            "{:>5} {:>12.2} {:>10.2} {:>10.2} {:>10.2} {:>12.2}",
            row.period, row.opening_balance, row.interest, row.principal, row.payment,
            row.closing_balance
        );
    }
}
