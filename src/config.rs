//! Engine tunables shared by every calculator

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ensure_finite, CalcError, CalcResult};

/// Hard iteration cap: 50 years of monthly periods
pub const DEFAULT_MAX_PERIODS: u32 = 600;

/// A balance at or below one cent counts as paid off
pub const DEFAULT_PAYOFF_EPSILON: f64 = 0.01;

/// Average days per calendar month, used for target-date horizons
pub const DEFAULT_DAYS_PER_MONTH: f64 = 30.44;

/// Configuration for simulations and projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of periods any loop may run
    pub max_periods: u32,

    /// Balance threshold treated as zero
    pub payoff_epsilon: f64,

    /// Compounding periods per year (12 for monthly)
    pub periods_per_year: u32,

    /// Days per period when converting calendar dates to periods
    pub days_per_month: f64,

    /// Whether the simulator keeps per-period schedule rows
    pub record_schedule: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_periods: DEFAULT_MAX_PERIODS,
            payoff_epsilon: DEFAULT_PAYOFF_EPSILON,
            periods_per_year: 12,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
            record_schedule: false,
        }
    }
}

impl EngineConfig {
    /// Default config with schedule recording switched on
    pub fn detailed() -> Self {
        Self {
            record_schedule: true,
            ..Self::default()
        }
    }

    /// Load a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> CalcResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.max_periods == 0 {
            return Err(CalcError::invalid("max_periods", "must be at least 1"));
        }
        if self.periods_per_year == 0 {
            return Err(CalcError::invalid("periods_per_year", "must be at least 1"));
        }
        if ensure_finite("payoff_epsilon", self.payoff_epsilon)? <= 0.0 {
            return Err(CalcError::invalid("payoff_epsilon", "must be greater than zero"));
        }
        if ensure_finite("days_per_month", self.days_per_month)? <= 0.0 {
            return Err(CalcError::invalid("days_per_month", "must be greater than zero"));
        }
        Ok(())
    }

    /// Convert an annual percentage rate to the per-period decimal rate
    pub fn periodic_rate(&self, annual_rate_percent: f64) -> f64 {
        annual_rate_percent / 100.0 / self.periods_per_year as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_periods, 600);
        assert_eq!(config.periods_per_year, 12);
        assert!(!config.record_schedule);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_periodic_rate() {
        let config = EngineConfig::default();
        assert!((config.periodic_rate(24.0) - 0.02).abs() < 1e-12);
        assert_eq!(config.periodic_rate(0.0), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_periods": 360}"#).unwrap();
        assert_eq!(config.max_periods, 360);
        assert_eq!(config.payoff_epsilon, DEFAULT_PAYOFF_EPSILON);
        assert_eq!(config.days_per_month, DEFAULT_DAYS_PER_MONTH);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: Result<EngineConfig, _> = serde_json::from_str(r#"{"max_period": 360}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let config = EngineConfig {
            max_periods: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_invalid_input());
    }
}
