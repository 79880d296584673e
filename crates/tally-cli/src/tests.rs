//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tally_core::test_utils::{category, date, income, month, monthly_series};
use tally_core::{AnalysisConfig, Transaction};
use tempfile::TempDir;

use crate::cli::Cli;
use crate::commands::{self, truncate, AsOf, ConfidenceFilter};

/// Six months of data ending March 2026, written as JSON
fn write_transactions(dir: &Path) -> PathBuf {
    let food = [300.0, 310.0, 290.0, 305.0, 295.0, 700.0];
    let mut txs: Vec<Transaction> = monthly_series(Some("food"), month(2025, 10), &food);
    txs.extend(monthly_series(
        Some("coffee"),
        month(2025, 10),
        &[60.0, 55.0, 10.0, 58.0, 62.0, 57.0],
    ));
    txs.push(income(2500.0, "2026-03-01", Some("salary")));

    let path = dir.join("transactions.json");
    std::fs::write(&path, serde_json::to_string(&txs).unwrap()).unwrap();
    path
}

fn write_categories(dir: &Path) -> PathBuf {
    let categories = vec![category("food", "Food"), category("coffee", "Coffee")];
    let path = dir.join("categories.json");
    std::fs::write(&path, serde_json::to_string(&categories).unwrap()).unwrap();
    path
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(dir.path());
    let categories = write_categories(dir.path());
    (dir, transactions, categories)
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_as_of_from_args() {
    assert_eq!(AsOf::from_args(None, false).unwrap(), AsOf::Today);
    assert_eq!(AsOf::from_args(None, true).unwrap(), AsOf::Latest);
    assert_eq!(
        AsOf::from_args(Some("2026-03-15"), false).unwrap(),
        AsOf::Date(date("2026-03-15"))
    );
    assert!(AsOf::from_args(Some("03/15/2026"), false).is_err());
}

#[test]
fn test_resolve_month() {
    assert_eq!(commands::resolve_month(Some("2026-03")).unwrap(), month(2026, 3));
    assert!(commands::resolve_month(Some("2026-13")).is_err());
    assert!(commands::resolve_month(Some("march")).is_err());
    assert!(commands::resolve_month(None).is_ok());
}

// ========== Insights Command Tests ==========

#[test]
fn test_cmd_insights() {
    let (_dir, transactions, categories) = setup();
    let result = commands::cmd_insights(
        None,
        &transactions,
        Some(&categories),
        AsOf::Date(date("2026-03-20")),
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_insights_json_latest() {
    let (_dir, transactions, _) = setup();
    let result = commands::cmd_insights(None, &transactions, None, AsOf::Latest, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_insights_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_insights(
        None,
        &dir.path().join("nope.csv"),
        None,
        AsOf::Today,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_insights_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    std::fs::write(
        &path,
        "Date,Description,Amount,Category\n\
         01/05/2026,Grocer,-120.50,food\n\
         02/05/2026,Grocer,-130.00,food\n\
         02/28/2026,Paycheck,2000.00,salary\n",
    )
    .unwrap();

    let result = commands::cmd_insights(None, &path, None, AsOf::Latest, false);
    assert!(result.is_ok());
}

// ========== Predict Command Tests ==========

#[test]
fn test_cmd_predict_filtered() {
    let (_dir, transactions, categories) = setup();
    let result = commands::cmd_predict(
        None,
        &transactions,
        Some(&categories),
        AsOf::Latest,
        ConfidenceFilter::AtLeast(None),
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_predict_all_json() {
    let (_dir, transactions, _) = setup();
    let result = commands::cmd_predict(
        None,
        &transactions,
        None,
        AsOf::Latest,
        ConfidenceFilter::All,
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_predict_rejects_bad_confidence() {
    let (_dir, transactions, _) = setup();
    let result = commands::cmd_predict(
        None,
        &transactions,
        None,
        AsOf::Latest,
        ConfidenceFilter::AtLeast(Some(1.5)),
        false,
    );
    assert!(result.is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report_with_budgets() {
    let (dir, transactions, categories) = setup();
    let budgets = dir.path().join("budgets.json");
    std::fs::write(
        &budgets,
        r#"[
  {"category_id": "food", "amount": 500.0},
  {"category_id": "coffee", "amount": 60.0, "month": "2026-03"},
  {"amount": 1000.0}
]"#,
    )
    .unwrap();

    let result = commands::cmd_report(
        None,
        &transactions,
        Some(&categories),
        Some(&budgets),
        Some("2026-03"),
        6,
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_json() {
    let (_dir, transactions, _) = setup();
    let result =
        commands::cmd_report(None, &transactions, None, None, Some("2026-03"), 3, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_zero_months() {
    let (_dir, transactions, _) = setup();
    let result =
        commands::cmd_report(None, &transactions, None, None, Some("2026-03"), 0, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_report_too_many_months() {
    let (_dir, transactions, _) = setup();
    let result =
        commands::cmd_report(None, &transactions, None, None, Some("2026-03"), 5000, false);
    assert!(result.is_err());

    let result =
        commands::cmd_report(None, &transactions, None, None, Some("2026-03"), 1200, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_bad_budgets() {
    let (dir, transactions, _) = setup();
    let budgets = dir.path().join("budgets.json");
    std::fs::write(&budgets, r#"[{"category_id": "food", "amount": -5.0}]"#).unwrap();

    let result = commands::cmd_report(
        None,
        &transactions,
        None,
        Some(&budgets),
        Some("2026-03"),
        6,
        false,
    );
    assert!(result.is_err());
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.toml");
    std::fs::write(&path, "[trend]\nthreshold_pct = 25.0\n").unwrap();

    assert!(commands::cmd_config(Some(&path)).is_ok());
    assert_eq!(commands::load_config(Some(&path)).unwrap().trend_threshold_pct, 25.0);
}

#[test]
fn test_cmd_config_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.toml");
    std::fs::write(&path, "[anomaly]\nstddev_multiplier = -1.0\n").unwrap();

    assert!(commands::cmd_config(Some(&path)).is_err());
}

#[test]
fn test_cmd_config_escapes_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.toml");
    std::fs::write(&path, "[display]\nuncategorized_label = \"No \\\"tag\\\"\"\n").unwrap();

    assert!(commands::cmd_config(Some(&path)).is_ok());
    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.uncategorized_label, "No \"tag\"");
    let rendered = config.to_toml_string().unwrap();
    assert_eq!(AnalysisConfig::from_toml_str(&rendered).unwrap(), config);
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Restaurants and Dining", 10), "Restaur...");
    assert_eq!(truncate("Café Crème Brûlée", 8), "Café ...");
}
