//! Spending Anomaly Insight
//!
//! Flags categories whose current-month spend sits well above their own
//! history (mean plus a multiple of the population standard deviation).

use super::aggregation::category_month_totals;
use super::engine::{AnalysisContext, InsightAnalyzer};
use super::stats::{mean, population_std_dev};
use super::types::{Insight, InsightKind, InsightType};

/// Insight that detects unusual category spending this month
pub struct AnomalyInsight;

impl AnomalyInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnomalyInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for AnomalyInsight {
    fn id(&self) -> InsightType {
        InsightType::Anomaly
    }

    fn name(&self) -> &'static str {
        "Spending Anomaly"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let month = ctx.month();
        let expenses = ctx.expenses();
        let mut insights = Vec::new();

        for (category_id, totals) in category_month_totals(&expenses) {
            let history = totals.values_before(month);
            if history.len() < ctx.config.min_history_months {
                tracing::debug!(
                    category = category_id.unwrap_or("-"),
                    months = history.len(),
                    "Skipping anomaly check, not enough history"
                );
                continue;
            }

            let (Some(avg), Some(std_dev)) = (mean(&history), population_std_dev(&history)) else {
                continue;
            };

            let current = totals.total(month);
            if current <= avg + ctx.config.anomaly_stddev_multiplier * std_dev {
                continue;
            }

            let percentage = if avg == 0.0 {
                0.0
            } else {
                (current - avg) / avg * 100.0
            };

            let name = ctx.category_label(category_id);
            let key = format!(
                "anomaly:{}:{}",
                month,
                category_id.unwrap_or("uncategorized")
            );

            insights.push(
                Insight::new(
                    InsightType::Anomaly,
                    key,
                    InsightKind::Warning,
                    format!(
                        "Unusual spending in {}: {} this month is {:.0}% above your average of {}",
                        name,
                        ctx.config.format_amount(current),
                        percentage,
                        ctx.config.format_amount(avg)
                    ),
                )
                .with_value(percentage)
                .with_category(category_id),
            );
        }

        insights
    }
}
