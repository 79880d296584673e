//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which analyzer produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Month-over-month spending trend
    Trend,
    /// Category spending far above its history
    Anomaly,
    /// Category where a cheaper month shows room to save
    Savings,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Trend => "trend",
            InsightType::Anomaly => "anomaly",
            InsightType::Savings => "savings",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trend" => Ok(InsightType::Trend),
            "anomaly" => Ok(InsightType::Anomaly),
            "savings" => Ok(InsightType::Savings),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something worth a closer look (spending up, unusual category)
    Warning,
    /// Good news (spending down)
    Success,
    /// Suggestion, no action required
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Success => "success",
            InsightKind::Info => "info",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a spending trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-facing observation about spending behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Analyzer that produced this insight
    pub insight_type: InsightType,
    /// Unique key for deduplication (e.g., "anomaly:2026-03:food")
    pub key: String,
    pub kind: InsightKind,
    pub message: String,
    /// Magnitude: a percentage for trends/anomalies, an amount for savings
    pub value: Option<f64>,
    pub trend: Option<TrendDirection>,
    /// Category the insight is about, if any
    pub category_id: Option<String>,
}

impl Insight {
    pub fn new(
        insight_type: InsightType,
        key: impl Into<String>,
        kind: InsightKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            key: key.into(),
            kind,
            message: message.into(),
            value: None,
            trend: None,
            category_id: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_trend(mut self, trend: TrendDirection) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_category(mut self, category_id: Option<&str>) -> Self {
        self.category_id = category_id.map(str::to_string);
        self
    }
}

/// Result of comparing this month's expenses to last month's
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: TrendDirection,
    /// Absolute percent change; 0 when there is no previous spend
    pub percentage: f64,
    pub current: f64,
    pub previous: f64,
}

/// Next-month spend forecast for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrediction {
    pub category_id: Option<String>,
    /// Never negative
    pub predicted_amount: f64,
    /// R² of the fit, clamped to [0, 1]
    pub confidence: f64,
    /// Number of monthly totals the fit used
    pub history_months: usize,
}

/// Keep predictions confident enough to show to a user
pub fn reliable_predictions(
    predictions: &[CategoryPrediction],
    min_confidence: f64,
) -> Vec<CategoryPrediction> {
    predictions
        .iter()
        .filter(|p| p.confidence >= min_confidence)
        .cloned()
        .collect()
}
