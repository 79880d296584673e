//! Report command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::reports::{budget_status, monthly_summary, monthly_trend, MAX_TREND_MONTHS};
use tally_core::{AnalysisConfig, BudgetProgress, BudgetState, MonthlySummary, TrendPoint};

use super::{load_budgets, load_catalog, load_config, load_transactions, resolve_month, truncate};

pub fn cmd_report(
    config_path: Option<&Path>,
    transactions_path: &Path,
    categories_path: Option<&Path>,
    budgets_path: Option<&Path>,
    month: Option<&str>,
    months: usize,
    json: bool,
) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }
    if months > MAX_TREND_MONTHS {
        anyhow::bail!("--months must be at most {}", MAX_TREND_MONTHS);
    }

    let config = load_config(config_path)?;
    let transactions = load_transactions(transactions_path)?;
    let catalog = load_catalog(categories_path)?;
    let budgets = load_budgets(budgets_path)?;
    let month = resolve_month(month)?;

    let summary = monthly_summary(&transactions, &catalog, month, &config);
    let progress = budget_status(&transactions, &budgets, &catalog, month, &config);
    let trend = monthly_trend(&transactions, month, months);

    if json {
        let output = serde_json::json!({
            "summary": summary,
            "budgets": progress,
            "trend": trend,
        });
        let output =
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", output);
        return Ok(());
    }

    print_summary(&summary, &config);
    if !progress.is_empty() {
        print_budgets(&progress, &config);
    }
    print_trend(&trend, &config);

    Ok(())
}

fn print_summary(summary: &MonthlySummary, config: &AnalysisConfig) {
    println!();
    println!("📊 Monthly Summary");
    println!("   Month: {}", summary.month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:       {}", config.format_amount(summary.income));
    println!("   Expenses:     {}", config.format_amount(summary.expenses));
    println!("   Net:          {}", config.format_amount(summary.net));
    println!("   Savings rate: {:.1}%", summary.savings_rate);
    println!("   Transactions: {}", summary.transaction_count);

    if summary.categories.is_empty() {
        println!();
        println!("   No spending found in this month.");
        return;
    }

    println!();
    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");

    for cat in &summary.categories {
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&cat.name, 25),
            cat.amount,
            cat.percentage,
            cat.transaction_count
        );
    }
}

fn print_budgets(progress: &[BudgetProgress], config: &AnalysisConfig) {
    println!();
    println!("🎯 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:25} │ {:>10} │ {:>10} │ {:>6} │ Status",
        "Budget", "Limit", "Spent", "Used"
    );
    println!("   ──────────────────────────┼────────────┼────────────┼────────┼─────────");

    for budget in progress {
        let status = match budget.status {
            BudgetState::OnTrack => "✅ on track",
            BudgetState::Warning => "⚠️  warning",
            BudgetState::Exceeded => "🔴 exceeded",
        };
        println!(
            "   {:25} │ {:>10} │ {:>10} │ {:>5.0}% │ {}",
            truncate(&budget.name, 25),
            config.format_amount(budget.budget),
            config.format_amount(budget.spent),
            budget.utilization,
            status
        );
    }
}

fn print_trend(trend: &[TrendPoint], config: &AnalysisConfig) {
    println!();
    println!("📈 Cash Flow");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Net"
    );
    println!("   ─────────┼──────────────┼──────────────┼──────────────");

    for point in trend {
        println!(
            "   {:8} │ {:>12} │ {:>12} │ {:>12}",
            point.month.to_string(),
            config.format_amount(point.income),
            config.format_amount(point.expenses),
            config.format_amount(point.net)
        );
    }

    let months = trend.len().max(1) as f64;
    let avg_expenses = trend.iter().map(|p| p.expenses).sum::<f64>() / months;
    println!("   ─────────┼──────────────┼──────────────┼──────────────");
    println!(
        "   {:8} │ {:>12} │ {:>12} │",
        "Average",
        "",
        config.format_amount(avg_expenses)
    );
}
