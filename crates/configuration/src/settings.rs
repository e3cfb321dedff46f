use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an absent `config.toml` yields a fully
/// usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSettings,
    pub bonus: BonusTiers,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks that the loaded values are logically consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_products_limit == 0 {
            return Err(ConfigError::ValidationError(
                "report.top_products_limit must be greater than 0".to_string(),
            ));
        }
        self.bonus.validate()
    }

    /// Replaces the per-seller product limit, e.g. from a command-line flag,
    /// and re-validates.
    pub fn override_top_products_limit(&mut self, limit: usize) -> Result<(), ConfigError> {
        self.report.top_products_limit = limit;
        self.validate()
    }
}

/// Parameters controlling the shape of the generated report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How many best-selling SKUs are listed per seller.
    pub top_products_limit: usize,
    pub output: OutputFormat,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_products_limit: 10,
            output: OutputFormat::Table,
        }
    }
}

/// How the CLI prints the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
}

/// Profit multipliers for the rank-based bonus.
///
/// Rank 0 earns `top_rate`, ranks 1 and 2 earn `runner_up_rate`, the last
/// seller earns nothing and everyone else earns `default_rate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BonusTiers {
    pub top_rate: Decimal,
    pub runner_up_rate: Decimal,
    pub default_rate: Decimal,
}

impl Default for BonusTiers {
    fn default() -> Self {
        Self {
            top_rate: dec!(0.15),
            runner_up_rate: dec!(0.10),
            default_rate: dec!(0.05),
        }
    }
}

impl BonusTiers {
    fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("top_rate", self.top_rate),
            ("runner_up_rate", self.runner_up_rate),
            ("default_rate", self.default_rate),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::ValidationError(format!(
                    "bonus.{name} must be between 0 and 1, got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// Logging verbosity used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
