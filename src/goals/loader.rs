//! Load goals from CSV

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use super::goal::{Goal, Priority};
use crate::error::{CalcError, CalcResult};

/// Raw CSV row; header `Name,TargetAmount,CurrentAmount,MonthlyContribution,AnnualRatePercent,TargetDate,Priority`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "TargetAmount")]
    target_amount: f64,
    #[serde(rename = "CurrentAmount")]
    current_amount: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "AnnualRatePercent")]
    annual_rate_percent: f64,
    #[serde(rename = "TargetDate", default)]
    target_date: Option<String>,
    #[serde(rename = "Priority", default)]
    priority: Option<String>,
}

impl CsvRow {
    fn to_goal(self) -> CalcResult<Goal> {
        let priority = match self.priority.as_deref() {
            Some(text) => text.parse::<Priority>()?,
            None => Priority::default(),
        };

        let target_date = match self.target_date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(
                NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|source| CalcError::Date {
                    value: text.to_string(),
                    source,
                })?,
            ),
            _ => None,
        };

        let goal = Goal {
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            monthly_contribution: self.monthly_contribution,
            annual_rate_percent: self.annual_rate_percent,
            target_date,
            priority,
        };
        goal.validate()?;
        Ok(goal)
    }
}

/// Load all goals from a CSV file
pub fn load_goals<P: AsRef<Path>>(path: P) -> CalcResult<Vec<Goal>> {
    let reader = Reader::from_path(path)?;
    collect_goals(reader)
}

/// Load goals from any reader (e.g., string buffer, uploaded file)
pub fn load_goals_from_reader<R: std::io::Read>(reader: R) -> CalcResult<Vec<Goal>> {
    collect_goals(Reader::from_reader(reader))
}

fn collect_goals<R: std::io::Read>(mut reader: Reader<R>) -> CalcResult<Vec<Goal>> {
    let mut goals = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        goals.push(row.to_goal()?);
    }
    Ok(goals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Name,TargetAmount,CurrentAmount,MonthlyContribution,AnnualRatePercent,TargetDate,Priority
Vacation,10000,2500,500,4.5,2026-06-01,high
Car,5000,1000,200,0,,
Laptop,3000,3000,0,0,,Low
";

    #[test]
    fn test_load_goals_from_reader() {
        let goals = load_goals_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(goals.len(), 3);

        assert_eq!(goals[0].name, "Vacation");
        assert_eq!(goals[0].priority, Priority::High);
        assert_eq!(goals[0].target_date, NaiveDate::from_ymd_opt(2026, 6, 1));

        assert_eq!(goals[1].target_date, None);
        assert_eq!(goals[1].priority, Priority::Medium);
        assert_eq!(goals[2].priority, Priority::Low);
    }

    #[test]
    fn test_bad_date_reported() {
        let csv = "\
Name,TargetAmount,CurrentAmount,MonthlyContribution,AnnualRatePercent,TargetDate,Priority
Trip,1000,0,100,0,06/01/2026,high
";
        let err = load_goals_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::Date { .. }));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = "\
Name,TargetAmount,CurrentAmount,MonthlyContribution,AnnualRatePercent,TargetDate,Priority
Trip,1000,-5,100,0,,
";
        let err = load_goals_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let csv = "\
Name,TargetAmount,CurrentAmount,MonthlyContribution,AnnualRatePercent,TargetDate,Priority
Trip,lots,0,100,0,,
";
        let err = load_goals_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::Csv(_)));
    }
}
