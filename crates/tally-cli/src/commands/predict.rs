//! Predict command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::insights::InsightEngine;
use tally_core::{reliable_predictions, CategoryPrediction, CategoryResolver};

use super::{load_catalog, load_config, load_transactions, truncate, AsOf};

/// Which predictions to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceFilter {
    /// Every prediction
    All,
    /// Predictions at or above the given confidence (config value when None)
    AtLeast(Option<f64>),
}

impl ConfidenceFilter {
    fn apply(
        &self,
        predictions: Vec<CategoryPrediction>,
        default_min: f64,
    ) -> Result<Vec<CategoryPrediction>> {
        match self {
            ConfidenceFilter::All => Ok(predictions),
            ConfidenceFilter::AtLeast(min) => {
                let min = min.unwrap_or(default_min);
                if !(0.0..=1.0).contains(&min) {
                    anyhow::bail!("--min-confidence must be between 0 and 1, got {}", min);
                }
                Ok(reliable_predictions(&predictions, min))
            }
        }
    }
}

pub fn cmd_predict(
    config_path: Option<&Path>,
    transactions_path: &Path,
    categories_path: Option<&Path>,
    as_of: AsOf,
    filter: ConfidenceFilter,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let transactions = load_transactions(transactions_path)?;
    let catalog = load_catalog(categories_path)?;

    let ctx = as_of.context(&transactions, &catalog, &config);
    let all = InsightEngine::new().predict(&ctx);
    let total = all.len();
    let predictions = filter.apply(all, config.min_confidence)?;

    if json {
        let output = serde_json::to_string_pretty(&predictions)
            .context("Failed to serialize predictions")?;
        println!("{}", output);
        return Ok(());
    }

    println!();
    println!("🔮 Next Month Forecast");
    println!("   Based on data through {}", ctx.month());
    println!("   ─────────────────────────────────────────────────────────────");

    if predictions.is_empty() {
        if total > 0 {
            println!(
                "   No confident predictions ({} hidden, use --all to show them).",
                total
            );
        } else {
            println!(
                "   Not enough history. Categories need {} months of spending.",
                config.min_history_months
            );
        }
        return Ok(());
    }

    println!(
        "   {:25} │ {:>10} │ {:>10} │ {:>6}",
        "Category", "Predicted", "Confidence", "Months"
    );
    println!("   ──────────────────────────┼────────────┼────────────┼───────");

    for prediction in &predictions {
        let name = catalog.display_name(
            prediction.category_id.as_deref(),
            &config.uncategorized_label,
        );
        println!(
            "   {:25} │ {:>10} │ {:>9.0}% │ {:>6}",
            truncate(name, 25),
            config.format_amount(prediction.predicted_amount),
            prediction.confidence * 100.0,
            prediction.history_months
        );
    }

    let predicted_total: f64 = predictions.iter().map(|p| p.predicted_amount).sum();
    println!("   ──────────────────────────┼────────────┼────────────┼───────");
    println!(
        "   {:25} │ {:>10} │",
        "Total",
        config.format_amount(predicted_total)
    );

    if predictions.len() < total {
        println!();
        println!(
            "   {} low-confidence predictions hidden (use --all to show)",
            total - predictions.len()
        );
    }

    Ok(())
}
