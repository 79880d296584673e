//! Tally CLI - Spending analytics for exported transactions
//!
//! Usage:
//!   tally insights -t transactions.csv     Spending insights for this month
//!   tally predict -t transactions.csv      Next month's forecast per category
//!   tally report -t transactions.csv       Monthly summary and budgets
//!   tally config                           Effective analysis thresholds

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        // Logs go to stderr so --json output stays parseable
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Insights {
            transactions,
            categories,
            as_of,
            latest,
            json,
        } => {
            let as_of = commands::AsOf::from_args(as_of.as_deref(), latest)?;
            commands::cmd_insights(
                config_path,
                &transactions,
                categories.as_deref(),
                as_of,
                json,
            )
        }
        Commands::Predict {
            transactions,
            categories,
            as_of,
            latest,
            min_confidence,
            all,
            json,
        } => {
            let as_of = commands::AsOf::from_args(as_of.as_deref(), latest)?;
            let filter = if all {
                commands::ConfidenceFilter::All
            } else {
                commands::ConfidenceFilter::AtLeast(min_confidence)
            };
            commands::cmd_predict(
                config_path,
                &transactions,
                categories.as_deref(),
                as_of,
                filter,
                json,
            )
        }
        Commands::Report {
            transactions,
            categories,
            budgets,
            month,
            months,
            json,
        } => commands::cmd_report(
            config_path,
            &transactions,
            categories.as_deref(),
            budgets.as_deref(),
            month.as_deref(),
            months,
            json,
        ),
        Commands::Config => commands::cmd_config(config_path),
    }
}
