use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    categories::Category,
    errors::{StatementParseError, StatementResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal, category: Category) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Inclusive date range a statement covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First and last calendar day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let next_month = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(date);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Widen the range so it includes `date`.
    pub fn extend(&mut self, date: NaiveDate) {
        self.start = self.start.min(date);
        self.end = self.end.max(date);
    }
}

/// Income, expense and per-category sums of a transaction list.
///
/// `sum(category_totals) == total_income + total_expenses` holds after every `add`.
/// An `add` that would overflow leaves the totals untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub category_totals: BTreeMap<Category, Decimal>,
}

impl Totals {
    pub fn add(&mut self, txn: &Transaction) -> StatementResult<()> {
        let overflow = || StatementParseError::AmountOverflow(txn.amount.to_string());

        let category_total = self
            .category_total(txn.category)
            .checked_add(txn.amount)
            .ok_or_else(overflow)?;
        let side = if txn.is_income() {
            &mut self.total_income
        } else {
            &mut self.total_expenses
        };
        *side = side.checked_add(txn.amount).ok_or_else(overflow)?;
        self.category_totals.insert(txn.category, category_total);
        Ok(())
    }

    pub fn fold<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> StatementResult<Self> {
        transactions.into_iter().try_fold(Self::default(), |mut totals, txn| {
            totals.add(txn)?;
            Ok(totals)
        })
    }

    pub fn net(&self) -> Decimal {
        self.total_income + self.total_expenses
    }

    pub fn category_total(&self, category: Category) -> Decimal {
        self.category_totals.get(&category).copied().unwrap_or(Decimal::ZERO)
    }
}

/// One imported document: its transactions, the period they cover and the derived totals.
///
/// A statement without a period is empty (tabular input where no row parsed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    period: Option<StatementPeriod>,
    totals: Totals,
    transactions: Vec<Transaction>,
    skipped_records: usize,
}

impl Statement {
    pub fn new(period: Option<StatementPeriod>) -> Self {
        Self {
            period,
            totals: Totals::default(),
            transactions: Vec::new(),
            skipped_records: 0,
        }
    }

    pub fn from_transactions(
        period: Option<StatementPeriod>,
        transactions: impl IntoIterator<Item = Transaction>,
    ) -> StatementResult<Self> {
        let mut statement = Self::new(period);
        for txn in transactions {
            statement.push(txn)?;
        }
        Ok(statement)
    }

    /// Append a transaction; on overflow neither the totals nor the list change.
    pub(crate) fn push(&mut self, txn: Transaction) -> StatementResult<()> {
        self.totals.add(&txn)?;
        self.transactions.push(txn);
        Ok(())
    }

    pub(crate) fn with_period(mut self, period: Option<StatementPeriod>) -> Self {
        self.period = period;
        self
    }

    pub(crate) fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped_records = skipped;
        self
    }

    pub fn period(&self) -> Option<StatementPeriod> {
        self.period
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.period.map(|p| p.start)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.period.map(|p| p.end)
    }

    pub fn is_empty(&self) -> bool {
        self.period.is_none() && self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn total_income(&self) -> Decimal {
        self.totals.total_income
    }

    pub fn total_expenses(&self) -> Decimal {
        self.totals.total_expenses
    }

    pub fn category_totals(&self) -> &BTreeMap<Category, Decimal> {
        &self.totals.category_totals
    }

    pub fn net_change(&self) -> Decimal {
        self.totals.net()
    }

    /// Records dropped during extraction because their date or amount did not parse.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    pub fn recompute_totals(&self) -> StatementResult<Totals> {
        Totals::fold(&self.transactions)
    }
}
