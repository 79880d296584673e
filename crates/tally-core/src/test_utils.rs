//! Test utilities for building transaction fixtures
//!
//! Available to unit tests and, with the `test-utils` feature, to other
//! crates' tests.

use chrono::NaiveDate;

use crate::models::{Category, MonthKey, Transaction, TransactionKind};

/// Parse a `YYYY-MM-DD` date, panicking on bad input
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn month(year: i32, month: u32) -> MonthKey {
    MonthKey::new(year, month).unwrap()
}

pub fn expense(amount: f64, on: &str, category: Option<&str>) -> Transaction {
    Transaction::new(amount, date(on), TransactionKind::Expense, category)
}

pub fn income(amount: f64, on: &str, category: Option<&str>) -> Transaction {
    Transaction::new(amount, date(on), TransactionKind::Income, category)
}

/// One expense per consecutive month starting at `start`, dated the 15th
pub fn monthly_series(
    category: Option<&str>,
    start: MonthKey,
    amounts: &[f64],
) -> Vec<Transaction> {
    let mut current = start;
    let mut txs = Vec::with_capacity(amounts.len());
    for amount in amounts {
        let on = NaiveDate::from_ymd_opt(current.year(), current.month(), 15).unwrap();
        txs.push(Transaction::new(
            *amount,
            on,
            TransactionKind::Expense,
            category,
        ));
        current = current.next();
    }
    txs
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        color: None,
        icon: None,
        owner_id: None,
    }
}
