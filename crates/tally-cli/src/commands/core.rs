//! Shared loading helpers for commands

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::import;
use tally_core::insights::AnalysisContext;
use tally_core::{AnalysisConfig, Budget, CategoryCatalog, MonthKey, Transaction};

/// Which month the analysis treats as "current"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsOf {
    /// Wall-clock month
    Today,
    /// Month of the newest transaction
    Latest,
    /// Month containing an explicit date
    Date(NaiveDate),
}

impl AsOf {
    /// Resolve `--as-of` / `--latest`
    pub fn from_args(as_of: Option<&str>, latest: bool) -> Result<Self> {
        match (as_of, latest) {
            (Some(date), _) => {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .context("Invalid --as-of date format (use YYYY-MM-DD)")?;
                Ok(AsOf::Date(date))
            }
            (None, true) => Ok(AsOf::Latest),
            (None, false) => Ok(AsOf::Today),
        }
    }

    /// Build the analysis context for this choice
    pub fn context<'a>(
        &self,
        transactions: &'a [Transaction],
        catalog: &'a CategoryCatalog,
        config: &'a AnalysisConfig,
    ) -> AnalysisContext<'a> {
        match self {
            AsOf::Today => AnalysisContext::current_month(transactions, catalog, config),
            AsOf::Latest => AnalysisContext::latest_data(transactions, catalog, config),
            AsOf::Date(date) => AnalysisContext::new(transactions, catalog, *date, config),
        }
    }
}

/// Load the analysis config (explicit path, data dir override, defaults)
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    AnalysisConfig::load(path).context("Failed to load analysis config")
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    import::load_transactions(path)
        .with_context(|| format!("Failed to load transactions from {}", path.display()))
}

/// Load categories, or an empty catalog when no file was given
pub fn load_catalog(path: Option<&Path>) -> Result<CategoryCatalog> {
    let Some(path) = path else {
        return Ok(CategoryCatalog::default());
    };
    let categories = import::load_categories(path)
        .with_context(|| format!("Failed to load categories from {}", path.display()))?;
    Ok(CategoryCatalog::new(categories))
}

pub fn load_budgets(path: Option<&Path>) -> Result<Vec<Budget>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    import::load_budgets(path)
        .with_context(|| format!("Failed to load budgets from {}", path.display()))
}

/// Parse `--month`, defaulting to the wall-clock month
pub fn resolve_month(month: Option<&str>) -> Result<MonthKey> {
    match month {
        Some(m) => m
            .parse::<MonthKey>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid --month format (use YYYY-MM)"),
        None => Ok(MonthKey::from_date(chrono::Local::now().date_naive())),
    }
}
