//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared loading helpers (config, input files, current month)
//! - `insights` - Spending insights
//! - `predict` - Per-category forecasts
//! - `report` - Monthly summary, budgets and cash flow
//! - `config` - Effective configuration display

pub mod config;
pub mod core;
pub mod insights;
pub mod predict;
pub mod report;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use insights::*;
pub use predict::*;
pub use report::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
