//! Insight Engine - orchestrates the analyzers and the forecaster

use chrono::NaiveDate;

use crate::config::AnalysisConfig;
use crate::models::{CategoryCatalog, CategoryResolver, MonthKey, Transaction};

use super::aggregation;
use super::types::{CategoryPrediction, Insight, InsightType};
use super::{AnomalyInsight, ExpenseForecaster, SavingsInsight, TrendInsight};

/// Context provided to insight analyzers
///
/// Borrowed for the duration of one call; nothing is cached across calls.
pub struct AnalysisContext<'a> {
    /// Transactions for one user (income and expenses)
    pub transactions: &'a [Transaction],
    /// Resolves category ids to display names
    pub categories: &'a dyn CategoryResolver,
    /// Date whose calendar month counts as "current"
    pub as_of: NaiveDate,
    /// Thresholds
    pub config: &'a AnalysisConfig,
}

impl<'a> AnalysisContext<'a> {
    /// Create a new analysis context
    pub fn new(
        transactions: &'a [Transaction],
        categories: &'a dyn CategoryResolver,
        as_of: NaiveDate,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            transactions,
            categories,
            as_of,
            config,
        }
    }

    /// Create context where "current month" is the wall-clock month
    pub fn current_month(
        transactions: &'a [Transaction],
        categories: &'a dyn CategoryResolver,
        config: &'a AnalysisConfig,
    ) -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(transactions, categories, today, config)
    }

    /// Create context where "current month" is the month of the newest
    /// transaction, falling back to today for an empty list
    pub fn latest_data(
        transactions: &'a [Transaction],
        categories: &'a dyn CategoryResolver,
        config: &'a AnalysisConfig,
    ) -> Self {
        let as_of = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        Self::new(transactions, categories, as_of, config)
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.as_of)
    }

    /// Expense transactions only
    pub fn expenses(&self) -> Vec<&'a Transaction> {
        aggregation::expenses(self.transactions)
    }

    /// Display name for a category reference
    pub fn category_label(&self, category_id: Option<&str>) -> &str {
        self.categories
            .display_name(category_id, &self.config.uncategorized_label)
    }
}

/// Trait for insight analyzers
pub trait InsightAnalyzer: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze transactions and produce insights
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    analyzers: Vec<Box<dyn InsightAnalyzer>>,
    forecaster: ExpenseForecaster,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in analyzers
    pub fn new() -> Self {
        let mut engine = Self {
            analyzers: vec![],
            forecaster: ExpenseForecaster::new(),
        };

        // Registration order is output order
        engine.register(Box::new(TrendInsight::new()));
        engine.register(Box::new(AnomalyInsight::new()));
        engine.register(Box::new(SavingsInsight::new()));

        engine
    }

    /// Register an insight analyzer
    pub fn register(&mut self, analyzer: Box<dyn InsightAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Run all analyzers and collect insights in registration order
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut all_insights = vec![];

        for analyzer in &self.analyzers {
            let insights = analyzer.analyze(ctx);
            tracing::debug!(
                insight = analyzer.id().as_str(),
                count = insights.len(),
                "Insight analysis complete"
            );
            all_insights.extend(insights);
        }

        all_insights
    }

    /// Forecast next month's spend per category
    pub fn predict(&self, ctx: &AnalysisContext<'_>) -> Vec<CategoryPrediction> {
        self.forecaster.forecast(ctx)
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.analyzers.iter().map(|a| a.id()).collect()
    }
}

/// Analyze transactions as of today with the default configuration
pub fn analyze(transactions: &[Transaction], categories: &dyn CategoryResolver) -> Vec<Insight> {
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::current_month(transactions, categories, &config);
    InsightEngine::new().analyze_all(&ctx)
}

/// Forecast next month's per-category spend with the default configuration
pub fn predict(transactions: &[Transaction]) -> Vec<CategoryPrediction> {
    let config = AnalysisConfig::default();
    let categories = CategoryCatalog::default();
    let ctx = AnalysisContext::current_month(transactions, &categories, &config);
    InsightEngine::new().predict(&ctx)
}
