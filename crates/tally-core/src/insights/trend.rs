//! Spending Trend Insight
//!
//! Compares this month's total expenses with last month's and reports
//! changes larger than the configured threshold.

use crate::models::{MonthKey, Transaction};

use super::aggregation::monthly_totals;
use super::engine::{AnalysisContext, InsightAnalyzer};
use super::types::{Insight, InsightKind, InsightType, TrendDirection, TrendResult};

/// Month-over-month expense trend for `month`
///
/// With no spend in the previous month the trend is stable at 0%.
pub fn compute_trend(expenses: &[&Transaction], month: MonthKey) -> TrendResult {
    let totals = monthly_totals(expenses.iter().copied());
    let current = totals.total(month);
    let previous = totals.total(month.previous());

    if previous == 0.0 {
        return TrendResult {
            trend: TrendDirection::Stable,
            percentage: 0.0,
            current,
            previous,
        };
    }

    let change = (current - previous) / previous * 100.0;
    let trend = if change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    TrendResult {
        trend,
        percentage: change.abs(),
        current,
        previous,
    }
}

/// Insight that reports notable month-over-month changes
pub struct TrendInsight;

impl TrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for TrendInsight {
    fn id(&self) -> InsightType {
        InsightType::Trend
    }

    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let month = ctx.month();
        let result = compute_trend(&ctx.expenses(), month);

        if result.percentage <= ctx.config.trend_threshold_pct {
            return vec![];
        }

        let key = format!("trend:{}", month);
        let insight = match result.trend {
            TrendDirection::Up => Insight::new(
                InsightType::Trend,
                key,
                InsightKind::Warning,
                format!(
                    "Your spending is up {:.1}% compared to last month ({} vs {})",
                    result.percentage,
                    ctx.config.format_amount(result.current),
                    ctx.config.format_amount(result.previous)
                ),
            ),
            // Stable always reports 0% and never passes the threshold
            TrendDirection::Down | TrendDirection::Stable => Insight::new(
                InsightType::Trend,
                key,
                InsightKind::Success,
                format!(
                    "Great job! Your spending is down {:.1}% compared to last month ({} vs {})",
                    result.percentage,
                    ctx.config.format_amount(result.current),
                    ctx.config.format_amount(result.previous)
                ),
            ),
        };

        vec![insight
            .with_value(result.percentage)
            .with_trend(result.trend)]
    }
}
