//! Cross-statement aggregates: category rankings, daily spending and the
//! plain-text summary handed to report generators.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    categories::Category,
    parsers::date::format_date,
    types::{Statement, StatementPeriod, Transaction},
};

/// Per-category sum across all statements.
pub fn merge_category_totals(statements: &[Statement]) -> BTreeMap<Category, Decimal> {
    let mut merged = BTreeMap::new();
    for (category, total) in statements.iter().flat_map(Statement::category_totals) {
        let sum = merged.entry(*category).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(*total);
    }
    merged
}

/// The `n` categories with the most spending, largest first. Income never appears.
pub fn top_expense_categories(statements: &[Statement], n: usize) -> Vec<(Category, Decimal)> {
    let mut expenses: Vec<(Category, Decimal)> = merge_category_totals(statements)
        .into_iter()
        .filter(|(category, total)| *category != Category::Income && *total < Decimal::ZERO)
        .collect();

    // most negative first; stable, so ties keep category order
    expenses.sort_by(|a, b| a.1.cmp(&b.1));
    expenses.truncate(n);
    expenses
}

/// Spending per calendar day as positive amounts, ordered by date.
pub fn daily_expenses(statements: &[Statement]) -> BTreeMap<NaiveDate, Decimal> {
    let mut days = BTreeMap::new();
    for txn in statements.iter().flat_map(Statement::transactions) {
        if txn.amount < Decimal::ZERO {
            let day = days.entry(txn.date).or_insert(Decimal::ZERO);
            *day = day.saturating_add(txn.amount.abs());
        }
    }
    days
}

fn largest<'a>(transactions: impl IntoIterator<Item = &'a Transaction>, n: usize) -> Vec<&'a Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
    sorted.sort_by(|a, b| b.amount.abs().cmp(&a.amount.abs()));
    sorted.truncate(n);
    sorted
}

/// The `n` transactions with the largest absolute amount, largest first.
pub fn largest_transactions(statement: &Statement, n: usize) -> Vec<&Transaction> {
    largest(statement.transactions(), n)
}

/// Overview of one or more statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub period: Option<StatementPeriod>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_change: Decimal,
    pub top_categories: Vec<(Category, Decimal)>,
    pub largest_transactions: Vec<Transaction>,
}

impl FinancialSummary {
    pub fn from_statements(statements: &[Statement], top_n: usize) -> Self {
        let period = statements
            .iter()
            .filter_map(Statement::period)
            .reduce(|mut acc, p| {
                acc.extend(p.start);
                acc.extend(p.end);
                acc
            });

        // statement totals can each sit near the Decimal limits
        let total_income = statements.iter().map(Statement::total_income).fold(Decimal::ZERO, Decimal::saturating_add);
        let total_expenses = statements.iter().map(Statement::total_expenses).fold(Decimal::ZERO, Decimal::saturating_add);

        Self {
            period,
            total_income,
            total_expenses,
            net_change: total_income.saturating_add(total_expenses),
            top_categories: top_expense_categories(statements, top_n),
            largest_transactions: largest(statements.iter().flat_map(Statement::transactions), top_n)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl fmt::Display for FinancialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(period) = self.period {
            writeln!(
                f,
                "Statement Period: {} to {}",
                format_date(period.start),
                format_date(period.end)
            )?;
        }
        writeln!(f, "Total Income: ${:.2}", self.total_income)?;
        writeln!(f, "Total Expenses: ${:.2}", self.total_expenses.abs())?;
        writeln!(f, "Net Change: ${:.2}", self.net_change)?;

        writeln!(f, "\nExpense Categories:")?;
        for (category, total) in &self.top_categories {
            writeln!(f, "- {}: ${:.2}", category, total.abs())?;
        }

        writeln!(f, "\nLargest Transactions:")?;
        for txn in &self.largest_transactions {
            writeln!(
                f,
                "- {}: {} - ${:.2} ({})",
                format_date(txn.date),
                txn.description,
                txn.amount.abs(),
                txn.category
            )?;
        }
        Ok(())
    }
}
