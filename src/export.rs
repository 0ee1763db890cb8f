//! CSV and JSON exports of parsed statements.
//!
//! The CSV export is a flat list of transactions. The JSON export keeps one
//! object per statement (`startDate`, `endDate`, totals, `categoryTotals`,
//! `transactions`) with dates as `MM/dd/yyyy` and amounts as plain JSON
//! numbers written digit for digit, and can be read back with [`from_json`].

use std::collections::BTreeMap;
use std::io::Write;

use csv::WriterBuilder;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    categories::Category,
    errors::{StatementParseError, StatementResult},
    parsers::date::{format_date, parse_date},
    types::{Statement, StatementPeriod, Transaction},
};

pub const CSV_HEADER: [&str; 4] = ["Date", "Description", "Amount", "Category"];

/// A decimal written as a bare JSON number with its exact digits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
struct Amount(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementRecord {
    start_date: Option<String>,
    end_date: Option<String>,
    total_income: Amount,
    total_expenses: Amount,
    category_totals: BTreeMap<Category, Amount>,
    transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransactionRecord {
    date: String,
    description: String,
    amount: Amount,
    category: Category,
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: format_date(txn.date),
            description: txn.description.clone(),
            amount: Amount(txn.amount),
            category: txn.category,
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = StatementParseError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Ok(Transaction::new(
            parse_date(&record.date)?,
            record.description,
            record.amount.0,
            record.category,
        ))
    }
}

impl From<&Statement> for StatementRecord {
    fn from(statement: &Statement) -> Self {
        Self {
            start_date: statement.start_date().map(format_date),
            end_date: statement.end_date().map(format_date),
            total_income: Amount(statement.total_income()),
            total_expenses: Amount(statement.total_expenses()),
            category_totals: statement
                .category_totals()
                .iter()
                .map(|(category, total)| (*category, Amount(*total)))
                .collect(),
            transactions: statement.transactions().iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<StatementRecord> for Statement {
    type Error = StatementParseError;

    fn try_from(record: StatementRecord) -> Result<Self, Self::Error> {
        let period = match (record.start_date, record.end_date) {
            (Some(start), Some(end)) => Some(StatementPeriod::new(parse_date(&start)?, parse_date(&end)?)),
            _ => None,
        };
        let transactions = record
            .transactions
            .into_iter()
            .map(Transaction::try_from)
            .collect::<StatementResult<Vec<_>>>()?;

        // Totals in the file are ignored; they are rebuilt from the transactions
        Statement::from_transactions(period, transactions)
    }
}

/// Write every transaction of every statement as `Date,Description,Amount,Category`.
///
/// The header is always written, even when there are no transactions.
pub fn write_csv<W: Write>(statements: &[Statement], writer: W) -> StatementResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for txn in statements.iter().flat_map(Statement::transactions) {
        let amount = txn.amount.to_string();
        wtr.write_record([
            format_date(txn.date).as_str(),
            txn.description.as_str(),
            amount.as_str(),
            txn.category.label(),
        ])?;
        rows += 1;
    }

    wtr.flush().map_err(csv::Error::from)?;
    info!("Exported {} transactions to CSV", rows);
    Ok(())
}

/// Pretty-printed JSON array, one object per statement.
pub fn to_json(statements: &[Statement]) -> StatementResult<String> {
    let records: Vec<StatementRecord> = statements.iter().map(Into::into).collect();
    let json = serde_json::to_string_pretty(&records)?;

    info!("Exported {} statements to JSON", records.len());
    Ok(json)
}

/// Load statements previously written by [`to_json`].
pub fn from_json(json: &str) -> StatementResult<Vec<Statement>> {
    let records: Vec<StatementRecord> = serde_json::from_str(json)?;
    records.into_iter().map(Statement::try_from).collect()
}
