//! Analysis configuration
//!
//! Thresholds used by the insight analyzers, forecaster and budget report.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path passed by the caller (e.g. `--config`), if it exists
//! 2. Override in data dir (~/.local/share/tally/config/analysis.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Effective analysis thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Month-over-month change (percent) before a trend insight is emitted
    pub trend_threshold_pct: f64,
    /// Standard deviations above the mean that count as an anomaly
    pub anomaly_stddev_multiplier: f64,
    /// Months of data a category needs for anomaly/savings/forecast analysis
    pub min_history_months: usize,
    /// Savings are suggested when the lowest month is below `mean * ratio`
    pub savings_ratio: f64,
    /// Predictions below this confidence are hidden from display
    pub min_confidence: f64,
    /// Utilization ratio at which a budget turns into a warning
    pub budget_warning_ratio: f64,
    /// Label used for transactions without a resolvable category
    pub uncategorized_label: String,
    /// Prefix used when formatting amounts in messages
    pub currency_symbol: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_threshold_pct: 10.0,
            anomaly_stddev_multiplier: 2.0,
            min_history_months: 3,
            savings_ratio: 0.7,
            min_confidence: 0.7,
            budget_warning_ratio: 0.8,
            uncategorized_label: "Uncategorized".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration (explicit path, then data dir override, then defaults)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if path.exists() {
                return Self::from_file(path);
            }
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Self::from_toml_str(DEFAULT_CONFIG);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Self::from_toml_str(DEFAULT_CONFIG),
        }
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded analysis config");
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML content, layering it over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(history) = raw.history {
            if let Some(months) = history.min_months {
                config.min_history_months = months;
            }
        }
        if let Some(threshold) = raw.trend.and_then(|t| t.threshold_pct) {
            config.trend_threshold_pct = threshold;
        }
        if let Some(multiplier) = raw.anomaly.and_then(|a| a.stddev_multiplier) {
            config.anomaly_stddev_multiplier = multiplier;
        }
        if let Some(ratio) = raw.savings.and_then(|s| s.ratio) {
            config.savings_ratio = ratio;
        }
        if let Some(confidence) = raw.forecast.and_then(|f| f.min_confidence) {
            config.min_confidence = confidence;
        }
        if let Some(ratio) = raw.budget.and_then(|b| b.warning_ratio) {
            config.budget_warning_ratio = ratio;
        }
        if let Some(display) = raw.display {
            if let Some(label) = display.uncategorized_label {
                config.uncategorized_label = label;
            }
            if let Some(symbol) = display.currency_symbol {
                config.currency_symbol = symbol;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the analyzers cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.trend_threshold_pct.is_nan() || self.trend_threshold_pct < 0.0 {
            return Err(Error::Config(
                "trend.threshold_pct must be non-negative".into(),
            ));
        }
        if self.anomaly_stddev_multiplier.is_nan() || self.anomaly_stddev_multiplier < 0.0 {
            return Err(Error::Config(
                "anomaly.stddev_multiplier must be non-negative".into(),
            ));
        }
        // A regression line needs at least two points
        if self.min_history_months < 2 {
            return Err(Error::Config("history.min_months must be at least 2".into()));
        }
        if !(self.savings_ratio > 0.0 && self.savings_ratio <= 1.0) {
            return Err(Error::Config("savings.ratio must be in (0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(Error::Config(
                "forecast.min_confidence must be in [0, 1]".into(),
            ));
        }
        if !(self.budget_warning_ratio > 0.0 && self.budget_warning_ratio <= 1.0) {
            return Err(Error::Config("budget.warning_ratio must be in (0, 1]".into()));
        }
        Ok(())
    }

    /// Render the effective config in the layout of `analysis.toml`
    pub fn to_toml_string(&self) -> Result<String> {
        let raw = RawConfig {
            history: Some(RawHistory {
                min_months: Some(self.min_history_months),
            }),
            trend: Some(RawTrend {
                threshold_pct: Some(self.trend_threshold_pct),
            }),
            anomaly: Some(RawAnomaly {
                stddev_multiplier: Some(self.anomaly_stddev_multiplier),
            }),
            savings: Some(RawSavings {
                ratio: Some(self.savings_ratio),
            }),
            forecast: Some(RawForecast {
                min_confidence: Some(self.min_confidence),
            }),
            budget: Some(RawBudget {
                warning_ratio: Some(self.budget_warning_ratio),
            }),
            display: Some(RawDisplay {
                uncategorized_label: Some(self.uncategorized_label.clone()),
                currency_symbol: Some(self.currency_symbol.clone()),
            }),
        };
        toml::to_string(&raw).map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    /// Format an amount with the configured currency symbol
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analysis.toml"))
}

/// Raw config structure for TOML parsing and rendering
#[derive(Debug, Deserialize, Serialize)]
struct RawConfig {
    history: Option<RawHistory>,
    trend: Option<RawTrend>,
    anomaly: Option<RawAnomaly>,
    savings: Option<RawSavings>,
    forecast: Option<RawForecast>,
    budget: Option<RawBudget>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawHistory {
    min_months: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawTrend {
    threshold_pct: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawAnomaly {
    stddev_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawSavings {
    ratio: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawForecast {
    min_confidence: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawBudget {
    warning_ratio: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawDisplay {
    uncategorized_label: Option<String>,
    currency_symbol: Option<String>,
}
