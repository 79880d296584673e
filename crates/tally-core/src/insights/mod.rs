//! Insight Engine - Spending Analytics
//!
//! Turns a user's transaction list into observations and forecasts. Every
//! call recomputes from the transactions it is given; there is no cached or
//! cross-call state, so calls are pure and may run in parallel.
//!
//! ## Insight Types
//!
//! - **Trend** - This month's expenses vs last month's
//! - **Anomaly** - Categories far above their own history this month
//! - **Savings** - Categories whose cheapest month shows room to save
//!
//! Next-month per-category forecasts come from [`ExpenseForecaster`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::current_month(&transactions, &catalog, &config);
//! let insights = engine.analyze_all(&ctx);
//! let predictions = engine.predict(&ctx);
//! ```

pub mod aggregation;
pub mod anomaly;
pub mod engine;
pub mod forecast;
pub mod savings;
pub mod stats;
pub mod trend;
pub mod types;

pub use aggregation::{monthly_totals, MonthBucket};
pub use anomaly::AnomalyInsight;
pub use engine::{analyze, predict, AnalysisContext, InsightAnalyzer, InsightEngine};
pub use forecast::ExpenseForecaster;
pub use savings::SavingsInsight;
pub use trend::{compute_trend, TrendInsight};
pub use types::{
    reliable_predictions, CategoryPrediction, Insight, InsightKind, InsightType, TrendDirection,
    TrendResult,
};
