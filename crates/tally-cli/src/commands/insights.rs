//! Insights command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::insights::InsightEngine;
use tally_core::{Insight, InsightKind};

use super::{load_catalog, load_config, load_transactions, AsOf};

pub fn cmd_insights(
    config_path: Option<&Path>,
    transactions_path: &Path,
    categories_path: Option<&Path>,
    as_of: AsOf,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let transactions = load_transactions(transactions_path)?;
    let catalog = load_catalog(categories_path)?;

    let ctx = as_of.context(&transactions, &catalog, &config);
    let insights = InsightEngine::new().analyze_all(&ctx);

    if json {
        let output =
            serde_json::to_string_pretty(&insights).context("Failed to serialize insights")?;
        println!("{}", output);
        return Ok(());
    }

    println!();
    println!("💡 Spending Insights");
    println!("   Month: {}", ctx.month());
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing stands out this month.");
        return Ok(());
    }

    for insight in &insights {
        print_insight(insight);
    }

    Ok(())
}

fn print_insight(insight: &Insight) {
    let icon = match insight.kind {
        InsightKind::Warning => "⚠️ ",
        InsightKind::Success => "✅",
        InsightKind::Info => "💡",
    };
    println!("   {} [{}] {}", icon, insight.insight_type, insight.message);
}
