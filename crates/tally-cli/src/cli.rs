//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Spending insights from your exported transactions
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance spending analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis config file (defaults to the data dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show spending insights (trends, anomalies, savings)
    Insights {
        /// Transactions file (CSV or JSON)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Categories file (CSV or JSON) for display names
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Treat this date's month as the current month (YYYY-MM-DD)
        #[arg(long, conflicts_with = "latest")]
        as_of: Option<String>,

        /// Treat the month of the newest transaction as the current month
        #[arg(long)]
        latest: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Forecast next month's spending per category
    Predict {
        /// Transactions file (CSV or JSON)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Categories file (CSV or JSON) for display names
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Treat this date's month as the current month (YYYY-MM-DD)
        #[arg(long, conflicts_with = "latest")]
        as_of: Option<String>,

        /// Treat the month of the newest transaction as the current month
        #[arg(long)]
        latest: bool,

        /// Hide predictions below this confidence (defaults to config value)
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Show every prediction regardless of confidence
        #[arg(long, conflicts_with = "min_confidence")]
        all: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Monthly summary, budget progress and cash flow
    Report {
        /// Transactions file (CSV or JSON)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Categories file (CSV or JSON) for display names
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Budgets file (JSON)
        #[arg(short, long)]
        budgets: Option<PathBuf>,

        /// Month to report on (YYYY-MM, defaults to this month)
        #[arg(long)]
        month: Option<String>,

        /// Number of months in the cash flow table
        #[arg(long, default_value = "6")]
        months: usize,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show the effective analysis configuration
    Config,
}
