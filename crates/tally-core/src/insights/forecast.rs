//! Expense Forecaster
//!
//! Predicts next month's spend per category by fitting a least-squares line
//! through the category's monthly totals up to and including the current
//! month. Months are indexed by position in chronological order, so gaps
//! between months are collapsed.

use super::aggregation::category_month_totals;
use super::engine::AnalysisContext;
use super::stats::LinearFit;
use super::types::CategoryPrediction;

/// Per-category next-month forecaster
pub struct ExpenseForecaster;

impl ExpenseForecaster {
    pub fn new() -> Self {
        Self
    }

    /// Forecast every category with enough monthly history
    ///
    /// Low-confidence predictions are returned too; filtering them is left
    /// to the caller (see [`super::reliable_predictions`]).
    pub fn forecast(&self, ctx: &AnalysisContext<'_>) -> Vec<CategoryPrediction> {
        let expenses = ctx.expenses();
        let mut predictions = Vec::new();

        for (category_id, totals) in category_month_totals(&expenses) {
            let series = totals.through(ctx.month()).values();
            if series.len() < ctx.config.min_history_months {
                continue;
            }

            let Some((predicted_amount, confidence)) = predict_series(&series) else {
                continue;
            };

            tracing::debug!(
                category = category_id.unwrap_or("-"),
                predicted = predicted_amount,
                confidence,
                "Category forecast"
            );

            predictions.push(CategoryPrediction {
                category_id: category_id.map(str::to_string),
                predicted_amount,
                confidence,
                history_months: series.len(),
            });
        }

        predictions
    }
}

impl Default for ExpenseForecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Next value of `series` and the fit's confidence, both clamped
fn predict_series(series: &[f64]) -> Option<(f64, f64)> {
    let fit = LinearFit::from_series(series)?;
    let predicted = fit.predict(series.len() as f64).max(0.0);
    let confidence = if fit.r_squared.is_nan() {
        0.0
    } else {
        fit.r_squared.clamp(0.0, 1.0)
    };
    Some((predicted, confidence))
}
