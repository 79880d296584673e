//! Month and category grouping of transactions

use std::collections::BTreeMap;

use crate::models::{MonthKey, Transaction};

use super::stats;

/// Summed amounts keyed by calendar month
///
/// Months without transactions have no entry and read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthBucket {
    totals: BTreeMap<MonthKey, f64>,
}

impl MonthBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, month: MonthKey, amount: f64) {
        *self.totals.entry(month).or_insert(0.0) += amount;
    }

    /// Total for a month, zero when absent
    pub fn total(&self, month: MonthKey) -> f64 {
        self.totals.get(&month).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, month: MonthKey) -> bool {
        self.totals.contains_key(&month)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Monthly totals in chronological order
    pub fn values(&self) -> Vec<f64> {
        self.totals.values().copied().collect()
    }

    /// Totals for the months strictly before `month`, chronological
    pub fn values_before(&self, month: MonthKey) -> Vec<f64> {
        self.totals.range(..month).map(|(_, total)| *total).collect()
    }

    /// The months up to and including `month`
    pub fn through(&self, month: MonthKey) -> MonthBucket {
        Self {
            totals: self.totals.range(..=month).map(|(k, v)| (*k, *v)).collect(),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        stats::mean(&self.values())
    }

    pub fn min(&self) -> Option<f64> {
        self.totals.values().copied().reduce(f64::min)
    }
}

/// Sum transaction amounts by the calendar month of their date
pub fn monthly_totals<'a, I>(transactions: I) -> MonthBucket
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut bucket = MonthBucket::new();
    for tx in transactions {
        bucket.add(tx.month(), tx.amount);
    }
    bucket
}

/// Only the expense-typed transactions
pub fn expenses(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|t| t.is_expense()).collect()
}

/// Group transactions by category reference; uncategorized ones share `None`
pub fn group_by_category<'a>(
    transactions: &[&'a Transaction],
) -> BTreeMap<Option<&'a str>, Vec<&'a Transaction>> {
    let mut groups: BTreeMap<Option<&'a str>, Vec<&'a Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups
            .entry(tx.category_id.as_deref())
            .or_default()
            .push(*tx);
    }
    groups
}

/// Monthly expense totals per category
pub fn category_month_totals<'a>(
    expenses: &[&'a Transaction],
) -> BTreeMap<Option<&'a str>, MonthBucket> {
    group_by_category(expenses)
        .into_iter()
        .map(|(category, txs)| (category, monthly_totals(txs)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, income, month};

    #[test]
    fn test_empty_input_yields_empty_bucket() {
        let empty: Vec<Transaction> = Vec::new();
        let bucket = monthly_totals(&empty);
        assert!(bucket.is_empty());
        assert_eq!(bucket.total(month(2026, 1)), 0.0);
        assert!(bucket.mean().is_none());
        assert!(bucket.min().is_none());
    }

    #[test]
    fn test_monthly_totals_groups_by_calendar_month() {
        let txs = vec![
            expense(10.0, "2026-01-03", Some("food")),
            expense(15.0, "2026-01-28", Some("food")),
            expense(7.5, "2026-02-01", Some("food")),
        ];
        let bucket = monthly_totals(&txs);

        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.total(month(2026, 1)), 25.0);
        assert_eq!(bucket.total(month(2026, 2)), 7.5);
        // No entry for a month without transactions
        assert!(!bucket.contains(month(2026, 3)));
        assert_eq!(bucket.total(month(2026, 3)), 0.0);
    }

    #[test]
    fn test_values_are_chronological() {
        let txs = vec![
            expense(30.0, "2026-03-01", None),
            expense(10.0, "2025-12-01", None),
            expense(20.0, "2026-01-01", None),
        ];
        let bucket = monthly_totals(&txs);
        assert_eq!(bucket.values(), vec![10.0, 20.0, 30.0]);
        assert_eq!(bucket.min(), Some(10.0));
    }

    #[test]
    fn test_values_bounded_by_month() {
        let txs = vec![
            expense(10.0, "2025-12-01", None),
            expense(20.0, "2026-01-01", None),
            expense(30.0, "2026-03-01", None),
        ];
        let bucket = monthly_totals(&txs);
        assert_eq!(bucket.values_before(month(2026, 1)), vec![10.0]);
        assert_eq!(bucket.values_before(month(2026, 2)), vec![10.0, 20.0]);
        assert!(bucket.values_before(month(2025, 12)).is_empty());

        let through = bucket.through(month(2026, 1));
        assert_eq!(through.values(), vec![10.0, 20.0]);
        assert_eq!(through.min(), Some(10.0));
        assert_eq!(through.mean(), Some(15.0));
        assert_eq!(bucket.through(month(2027, 1)), bucket);
    }

    #[test]
    fn test_expenses_excludes_income() {
        let txs = vec![
            expense(10.0, "2026-01-03", Some("food")),
            income(1000.0, "2026-01-01", Some("salary")),
        ];
        let only = expenses(&txs);
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].amount, 10.0);
    }

    #[test]
    fn test_group_by_category_keeps_uncategorized_together() {
        let txs = vec![
            expense(10.0, "2026-01-03", Some("food")),
            expense(5.0, "2026-01-04", None),
            expense(6.0, "2026-01-05", None),
        ];
        let refs = expenses(&txs);
        let groups = group_by_category(&refs);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&None].len(), 2);
        assert_eq!(groups[&Some("food")].len(), 1);
    }
}
