//! Monthly reports: income/expense summary, budget progress and a
//! month-by-month cash flow series

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::insights::aggregation::{group_by_category, monthly_totals};
use crate::models::{Budget, CategoryResolver, MonthKey, Transaction, TransactionKind};

/// Spending in one category for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category_id: Option<String>,
    pub name: String,
    pub amount: f64,
    /// Share of the month's expenses
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Income, expenses and category breakdown for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    /// Net as a percentage of income; 0 without income
    pub savings_rate: f64,
    pub transaction_count: usize,
    pub categories: Vec<CategorySpending>,
}

/// Build the summary for `month`
pub fn monthly_summary(
    transactions: &[Transaction],
    categories: &dyn CategoryResolver,
    month: MonthKey,
    config: &AnalysisConfig,
) -> MonthlySummary {
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .collect();

    let income: f64 = in_month
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .map(|t| t.amount)
        .sum();
    let month_expenses: Vec<&Transaction> =
        in_month.iter().copied().filter(|t| t.is_expense()).collect();
    let expenses: f64 = month_expenses.iter().map(|t| t.amount).sum();

    let mut breakdown: Vec<CategorySpending> = group_by_category(&month_expenses)
        .into_iter()
        .map(|(category_id, txs)| {
            let amount: f64 = txs.iter().map(|t| t.amount).sum();
            CategorySpending {
                category_id: category_id.map(str::to_string),
                name: categories
                    .display_name(category_id, &config.uncategorized_label)
                    .to_string(),
                amount,
                percentage: if expenses > 0.0 {
                    amount / expenses * 100.0
                } else {
                    0.0
                },
                transaction_count: txs.len(),
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.name.cmp(&b.name))
    });

    let net = income - expenses;
    MonthlySummary {
        month,
        income,
        expenses,
        net,
        savings_rate: if income > 0.0 { net / income * 100.0 } else { 0.0 },
        transaction_count: in_month.len(),
        categories: breakdown,
    }
}

/// Where spending stands against a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetState::OnTrack => "on_track",
            BudgetState::Warning => "warning",
            BudgetState::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spend against one budget for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// None for the overall budget
    pub category_id: Option<String>,
    pub name: String,
    pub month: MonthKey,
    pub budget: f64,
    pub spent: f64,
    /// Negative once overspent
    pub remaining: f64,
    /// Spent as a percentage of the budget
    pub utilization: f64,
    pub status: BudgetState,
}

/// Compare each budget that applies to `month` with that month's expenses
///
/// A budget for a specific month takes precedence over an every-month
/// budget for the same category.
pub fn budget_status(
    transactions: &[Transaction],
    budgets: &[Budget],
    categories: &dyn CategoryResolver,
    month: MonthKey,
    config: &AnalysisConfig,
) -> Vec<BudgetProgress> {
    let mut applicable: BTreeMap<Option<&str>, &Budget> = BTreeMap::new();
    for budget in budgets.iter().filter(|b| b.applies_to(month)) {
        let key = budget.category_id.as_deref();
        match applicable.get(&key) {
            Some(existing) if existing.month.is_some() => {}
            _ => {
                applicable.insert(key, budget);
            }
        }
    }

    let month_expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
        .collect();

    applicable
        .into_iter()
        .map(|(category_id, budget)| {
            let spent: f64 = month_expenses
                .iter()
                .filter(|t| category_id.is_none() || t.category_id.as_deref() == category_id)
                .map(|t| t.amount)
                .sum();

            let name = match category_id {
                Some(_) => categories
                    .display_name(category_id, &config.uncategorized_label)
                    .to_string(),
                None => "Overall".to_string(),
            };

            BudgetProgress {
                category_id: category_id.map(str::to_string),
                name,
                month,
                budget: budget.amount,
                spent,
                remaining: budget.amount - spent,
                utilization: utilization(spent, budget.amount),
                status: budget_state(spent, budget.amount, config.budget_warning_ratio),
            }
        })
        .collect()
}

fn utilization(spent: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        spent / budget * 100.0
    } else if spent > 0.0 {
        100.0
    } else {
        0.0
    }
}

fn budget_state(spent: f64, budget: f64, warning_ratio: f64) -> BudgetState {
    if spent > budget {
        BudgetState::Exceeded
    } else if budget > 0.0 && spent >= budget * warning_ratio {
        BudgetState::Warning
    } else {
        BudgetState::OnTrack
    }
}

/// Income and expenses for one month of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Longest cash-flow series `monthly_trend` will produce (100 years)
pub const MAX_TREND_MONTHS: usize = 1200;

/// Cash flow for the `months` months ending at `end`, oldest first
///
/// Months without transactions appear with zeros. `months` is capped at
/// [`MAX_TREND_MONTHS`].
pub fn monthly_trend(
    transactions: &[Transaction],
    end: MonthKey,
    months: usize,
) -> Vec<TrendPoint> {
    let income = monthly_totals(
        transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income),
    );
    let expenses = monthly_totals(transactions.iter().filter(|t| t.is_expense()));

    let mut keys = Vec::new();
    let mut current = end;
    for _ in 0..months.min(MAX_TREND_MONTHS) {
        keys.push(current);
        current = current.previous();
    }
    keys.reverse();

    keys.into_iter()
        .map(|month| {
            let income = income.total(month);
            let expenses = expenses.total(month);
            TrendPoint {
                month,
                income,
                expenses,
                net: income - expenses,
            }
        })
        .collect()
}
