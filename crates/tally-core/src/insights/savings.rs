//! Savings Opportunity Insight
//!
//! A category whose cheapest month is far below its average month shows the
//! user has already managed on less; the gap is the suggested saving.

use super::aggregation::category_month_totals;
use super::engine::{AnalysisContext, InsightAnalyzer};
use super::types::{Insight, InsightKind, InsightType};

/// Insight that identifies savings opportunities
pub struct SavingsInsight;

impl SavingsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SavingsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for SavingsInsight {
    fn id(&self) -> InsightType {
        InsightType::Savings
    }

    fn name(&self) -> &'static str {
        "Savings Opportunity"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let expenses = ctx.expenses();
        let mut insights = Vec::new();

        for (category_id, totals) in category_month_totals(&expenses) {
            let totals = totals.through(ctx.month());
            if totals.len() < ctx.config.min_history_months {
                continue;
            }

            let (Some(avg), Some(lowest)) = (totals.mean(), totals.min()) else {
                continue;
            };

            if lowest >= avg * ctx.config.savings_ratio {
                continue;
            }

            let potential = avg - lowest;
            let name = ctx.category_label(category_id);
            let key = format!("savings:{}", category_id.unwrap_or("uncategorized"));

            insights.push(
                Insight::new(
                    InsightType::Savings,
                    key,
                    InsightKind::Info,
                    format!(
                        "You could save about {}/month on {}. Your lowest month was {}, compared to an average of {}",
                        ctx.config.format_amount(potential),
                        name,
                        ctx.config.format_amount(lowest),
                        ctx.config.format_amount(avg)
                    ),
                )
                .with_value(potential)
                .with_category(category_id),
            );
        }

        insights
    }
}
