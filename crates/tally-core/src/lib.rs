//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Domain models (transactions, categories, budgets, month keys)
//! - Loaders for exported transaction, category and budget files
//! - Layered analysis configuration
//! - Spending insights engine (trends, anomalies, savings, forecasts)
//! - Monthly summary and budget reports

pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod reports;

/// Test utilities including transaction builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use insights::{
    analyze, predict, reliable_predictions, AnalysisContext, CategoryPrediction, Insight,
    InsightEngine, InsightKind, InsightType, TrendDirection, TrendResult,
};
pub use models::{
    Budget, Category, CategoryCatalog, CategoryResolver, MonthKey, Transaction, TransactionKind,
};
pub use reports::{BudgetProgress, BudgetState, CategorySpending, MonthlySummary, TrendPoint};
