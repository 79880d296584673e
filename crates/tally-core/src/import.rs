//! Loaders for exported transaction, category and budget files
//!
//! This is the boundary where malformed rows are rejected; everything past
//! it (the insight engine, reports) assumes valid dates and positive amounts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Budget, Category, Transaction, TransactionKind};

/// Column positions resolved from a transaction CSV header
struct TransactionColumns {
    date: usize,
    amount: usize,
    kind: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
    owner: Option<usize>,
    id: Option<usize>,
}

impl TransactionColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };

        Ok(Self {
            date: find(&["date", "transaction date"])
                .ok_or_else(|| Error::Import("Missing 'date' column".into()))?,
            amount: find(&["amount"])
                .ok_or_else(|| Error::Import("Missing 'amount' column".into()))?,
            kind: find(&["type", "kind"]),
            category: find(&["category", "category_id"]),
            description: find(&["description", "memo"]),
            owner: find(&["owner", "owner_id", "user_id"]),
            id: find(&["id"]),
        })
    }
}

fn optional_field(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a transaction CSV with a header row
///
/// Without a `type` column, negative amounts are expenses and positive
/// amounts income. The stored amount is always positive.
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = TransactionColumns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;

        let date_str = record
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date =
            parse_date(date_str).map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let signed =
            parse_amount(amount_str).map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let (kind, amount) = match optional_field(&record, columns.kind) {
            Some(kind) => {
                let kind = kind
                    .parse::<TransactionKind>()
                    .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
                (kind, signed)
            }
            None if signed < 0.0 => (TransactionKind::Expense, -signed),
            None => (TransactionKind::Income, signed),
        };

        if !(amount > 0.0 && amount.is_finite()) {
            return Err(Error::Import(format!(
                "Line {}: amount must be positive, got {}",
                line, amount_str
            )));
        }

        transactions.push(Transaction {
            id: optional_field(&record, columns.id),
            amount,
            date,
            description: optional_field(&record, columns.description).unwrap_or_default(),
            category_id: optional_field(&record, columns.category),
            kind,
            owner_id: optional_field(&record, columns.owner),
        });
    }

    debug!(count = transactions.len(), "Parsed transaction CSV");
    Ok(transactions)
}

/// Parse a JSON array of transactions
pub fn parse_transactions_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;

    for (index, tx) in transactions.iter().enumerate() {
        if !(tx.amount > 0.0 && tx.amount.is_finite()) {
            return Err(Error::Import(format!(
                "Transaction {}: amount must be positive, got {}",
                index, tx.amount
            )));
        }
    }

    debug!(count = transactions.len(), "Parsed transaction JSON");
    Ok(transactions)
}

/// Parse a JSON array of categories
pub fn parse_categories_json<R: Read>(reader: R) -> Result<Vec<Category>> {
    let categories: Vec<Category> = serde_json::from_reader(reader)?;
    validate_categories(&categories)?;
    Ok(categories)
}

/// Parse a category CSV (`id,name[,color][,icon]`)
pub fn parse_categories_csv<R: Read>(reader: R) -> Result<Vec<Category>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut categories = Vec::new();
    for result in rdr.deserialize() {
        let category: Category = result?;
        categories.push(category);
    }

    validate_categories(&categories)?;
    Ok(categories)
}

fn validate_categories(categories: &[Category]) -> Result<()> {
    for category in categories {
        if category.id.trim().is_empty() {
            return Err(Error::Import(format!(
                "Category '{}' has an empty id",
                category.name
            )));
        }
    }
    Ok(())
}

/// Parse a JSON array of budgets
pub fn parse_budgets_json<R: Read>(reader: R) -> Result<Vec<Budget>> {
    let budgets: Vec<Budget> = serde_json::from_reader(reader)?;

    for (index, budget) in budgets.iter().enumerate() {
        if !(budget.amount >= 0.0 && budget.amount.is_finite()) {
            return Err(Error::Import(format!(
                "Budget {}: amount must be non-negative, got {}",
                index, budget.amount
            )));
        }
    }

    Ok(budgets)
}

/// Supported file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Csv,
    Json,
}

fn detect_format(path: &Path) -> Result<FileFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("csv") => Ok(FileFormat::Csv),
        Some("json") => Ok(FileFormat::Json),
        _ => Err(Error::InvalidData(format!(
            "Unsupported file type (use .csv or .json): {}",
            path.display()
        ))),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// Load transactions from a `.csv` or `.json` file
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let transactions = match detect_format(path)? {
        FileFormat::Csv => parse_transactions_csv(open(path)?)?,
        FileFormat::Json => parse_transactions_json(open(path)?)?,
    };
    info!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded transactions"
    );
    Ok(transactions)
}

/// Load categories from a `.csv` or `.json` file
pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    match detect_format(path)? {
        FileFormat::Csv => parse_categories_csv(open(path)?),
        FileFormat::Json => parse_categories_json(open(path)?),
    }
}

/// Load budgets from a `.json` file
pub fn load_budgets(path: &Path) -> Result<Vec<Budget>> {
    match detect_format(path)? {
        FileFormat::Json => parse_budgets_json(open(path)?),
        FileFormat::Csv => Err(Error::InvalidData(format!(
            "Budgets must be a .json file: {}",
            path.display()
        ))),
    }
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();

    // %Y would also read "24" as the year 24
    let short_year = s.contains('/') && s.rsplit('/').next().is_some_and(|y| y.len() == 2);
    let formats: &[&str] = if short_year {
        &["%m/%d/%y"] // 01/15/24
    } else {
        &[
            "%Y-%m-%d", // 2024-01-15
            "%m/%d/%Y", // 01/15/2024
        ]
    };

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(format!("Unable to parse date: {}", s))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| format!("Unable to parse amount: {}", s))
}
