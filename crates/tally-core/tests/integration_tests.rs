//! Integration tests for tally-core
//!
//! These tests exercise the full load → analyze → predict → report workflow.

use tally_core::{
    config::AnalysisConfig,
    import::{load_budgets, load_categories, load_transactions, parse_transactions_csv},
    insights::{AnalysisContext, InsightEngine},
    reliable_predictions, reports, BudgetState, CategoryCatalog, InsightKind, InsightType,
    MonthKey, TrendDirection,
};

use chrono::NaiveDate;

/// Four months of household spending ending in April 2026:
/// - groceries steady near 400, then a spike to 900 in April
/// - dining 120, 110, 20, 115 (one cheap month)
/// - transport climbing by 10 each month, nothing yet in April
/// - one uncategorized charge in April
fn household_csv() -> &'static str {
    r#"date,description,amount,type,category
2026-01-03,Paycheck,3000.00,income,salary
2026-01-05,Grocer,400.00,expense,groceries
2026-01-12,Bistro,120.00,expense,dining
2026-01-20,Metro card,50.00,expense,transport
2026-02-03,Paycheck,3000.00,income,salary
2026-02-05,Grocer,410.00,expense,groceries
2026-02-12,Bistro,110.00,expense,dining
2026-02-20,Metro card,60.00,expense,transport
2026-03-03,Paycheck,3000.00,income,salary
2026-03-05,Grocer,390.00,expense,groceries
2026-03-12,Bistro,20.00,expense,dining
2026-03-20,Metro card,70.00,expense,transport
2026-04-03,Paycheck,3000.00,income,salary
2026-04-05,Grocer,900.00,expense,groceries
2026-04-12,Bistro,115.00,expense,dining
2026-04-22,Mystery charge,35.00,expense,"#
}

fn categories_json() -> &'static str {
    r#"[
  {"id": "groceries", "name": "Groceries"},
  {"id": "dining", "name": "Dining Out"},
  {"id": "transport", "name": "Transport"},
  {"id": "salary", "name": "Salary"}
]"#
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 28).unwrap()
}

// =============================================================================
// Insight Workflow
// =============================================================================

#[test]
fn test_full_insight_workflow() {
    let transactions =
        parse_transactions_csv(household_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(transactions.len(), 16);

    let categories: Vec<_> = serde_json::from_str(categories_json()).unwrap();
    let catalog = CategoryCatalog::new(categories);
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::new(&transactions, &catalog, as_of(), &config);

    let insights = InsightEngine::new().analyze_all(&ctx);

    // March 480 → April 1050 is well over the 10% threshold
    let trend = insights
        .iter()
        .find(|i| i.insight_type == InsightType::Trend)
        .expect("Expected a trend insight");
    assert_eq!(trend.kind, InsightKind::Warning);
    assert_eq!(trend.trend, Some(TrendDirection::Up));

    let anomalies: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_type == InsightType::Anomaly)
        .collect();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].category_id.as_deref(), Some("groceries"));
    assert!(anomalies[0].message.contains("Groceries"));

    let savings: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_type == InsightType::Savings)
        .collect();
    assert_eq!(savings.len(), 1);
    assert_eq!(savings[0].category_id.as_deref(), Some("dining"));
    assert!(savings[0].message.contains("Dining Out"));
}

#[test]
fn test_insights_grouped_by_type_in_order() {
    let transactions = parse_transactions_csv(household_csv().as_bytes()).unwrap();
    let catalog = CategoryCatalog::default();
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::new(&transactions, &catalog, as_of(), &config);

    let types: Vec<InsightType> = InsightEngine::new()
        .analyze_all(&ctx)
        .iter()
        .map(|i| i.insight_type)
        .collect();

    let mut sorted = types.clone();
    sorted.sort_by_key(|t| match t {
        InsightType::Trend => 0,
        InsightType::Anomaly => 1,
        InsightType::Savings => 2,
    });
    assert_eq!(types, sorted);
}

#[test]
fn test_analysis_is_repeatable() {
    let transactions = parse_transactions_csv(household_csv().as_bytes()).unwrap();
    let catalog = CategoryCatalog::default();
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::new(&transactions, &catalog, as_of(), &config);
    let engine = InsightEngine::new();

    assert_eq!(engine.analyze_all(&ctx), engine.analyze_all(&ctx));
    assert_eq!(engine.predict(&ctx), engine.predict(&ctx));
}

#[test]
fn test_empty_input_yields_nothing() {
    let catalog = CategoryCatalog::default();
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::new(&[], &catalog, as_of(), &config);
    let engine = InsightEngine::new();

    assert!(engine.analyze_all(&ctx).is_empty());
    assert!(engine.predict(&ctx).is_empty());
}

#[test]
fn test_latest_data_context_uses_newest_month() {
    let transactions = parse_transactions_csv(household_csv().as_bytes()).unwrap();
    let catalog = CategoryCatalog::default();
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::latest_data(&transactions, &catalog, &config);

    assert_eq!(ctx.month(), MonthKey::new(2026, 4).unwrap());
}

// =============================================================================
// Forecasts
// =============================================================================

#[test]
fn test_forecast_workflow() {
    let transactions = parse_transactions_csv(household_csv().as_bytes()).unwrap();
    let catalog = CategoryCatalog::default();
    let config = AnalysisConfig::default();
    let ctx = AnalysisContext::new(&transactions, &catalog, as_of(), &config);

    let predictions = InsightEngine::new().predict(&ctx);

    // Salary is income, uncategorized has a single month
    assert_eq!(predictions.len(), 3);
    for p in &predictions {
        assert!(p.predicted_amount >= 0.0);
        assert!((0.0..=1.0).contains(&p.confidence));
    }

    let transport = predictions
        .iter()
        .find(|p| p.category_id.as_deref() == Some("transport"))
        .unwrap();
    assert!((transport.predicted_amount - 80.0).abs() < 1e-9);
    assert!((transport.confidence - 1.0).abs() < 1e-9);

    let reliable = reliable_predictions(&predictions, config.min_confidence);
    assert!(reliable
        .iter()
        .any(|p| p.category_id.as_deref() == Some("transport")));
    assert!(reliable.iter().all(|p| p.confidence >= config.min_confidence));
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_reports_workflow() {
    let transactions = parse_transactions_csv(household_csv().as_bytes()).unwrap();
    let catalog = CategoryCatalog::default();
    let config = AnalysisConfig::default();
    let april = MonthKey::new(2026, 4).unwrap();

    let summary = reports::monthly_summary(&transactions, &catalog, april, &config);
    assert_eq!(summary.income, 3000.0);
    assert_eq!(summary.expenses, 1050.0);
    assert_eq!(summary.categories[0].category_id.as_deref(), Some("groceries"));

    let trend = reports::monthly_trend(&transactions, april, 6);
    assert_eq!(trend.len(), 6);
    assert_eq!(trend[0].expenses, 0.0);
    assert_eq!(trend[5].expenses, 1050.0);
}

// =============================================================================
// File Loading
// =============================================================================

#[test]
fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();

    let tx_path = dir.path().join("transactions.csv");
    std::fs::write(&tx_path, household_csv()).unwrap();
    let cat_path = dir.path().join("categories.json");
    std::fs::write(&cat_path, categories_json()).unwrap();
    let budget_path = dir.path().join("budgets.json");
    std::fs::write(
        &budget_path,
        r#"[{"category_id": "groceries", "amount": 500.0}]"#,
    )
    .unwrap();

    let transactions = load_transactions(&tx_path).expect("Failed to load transactions");
    let catalog = CategoryCatalog::new(load_categories(&cat_path).unwrap());
    let budgets = load_budgets(&budget_path).unwrap();

    assert_eq!(transactions.len(), 16);
    assert_eq!(catalog.len(), 4);

    let progress = reports::budget_status(
        &transactions,
        &budgets,
        &catalog,
        MonthKey::new(2026, 4).unwrap(),
        &AnalysisConfig::default(),
    );
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].name, "Groceries");
    assert_eq!(progress[0].status, BudgetState::Exceeded);
}

#[test]
fn test_unsupported_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.xlsx");
    std::fs::write(&path, "not a spreadsheet").unwrap();

    assert!(load_transactions(&path).is_err());
}
