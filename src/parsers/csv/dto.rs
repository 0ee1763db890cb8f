use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    categories::CategoryRules,
    errors::{StatementParseError, StatementResult},
    parsers::{amount::parse_amount, date::StatementDate},
    types::Transaction,
};

/// What a CSV column holds, inferred from its header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Date,
    Description,
    Amount,
}

impl ColumnRole {
    const ALL: [ColumnRole; 3] = [ColumnRole::Date, ColumnRole::Description, ColumnRole::Amount];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Date => &["date"],
            ColumnRole::Description => &["description", "merchant", "payee"],
            ColumnRole::Amount => &["amount", "transaction"],
        }
    }

    /// First role whose keywords occur in the header, checked date, description, amount.
    pub fn classify(header: &str) -> Option<Self> {
        let header = header.trim_start_matches('\u{feff}').trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.keywords().iter().any(|k| header.contains(k)))
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnRole::Date => "date",
            ColumnRole::Description => "description",
            ColumnRole::Amount => "amount",
        })
    }
}

/// Column indices of the three fields a transaction needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

impl ColumnMap {
    /// Infer roles from the header row. The first header matching a role keeps it.
    pub fn infer<S: AsRef<str>>(headers: &[S]) -> StatementResult<Self> {
        let mut date = None;
        let mut description = None;
        let mut amount = None;

        for (idx, header) in headers.iter().enumerate() {
            let slot = match ColumnRole::classify(header.as_ref()) {
                Some(ColumnRole::Date) => &mut date,
                Some(ColumnRole::Description) => &mut description,
                Some(ColumnRole::Amount) => &mut amount,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        match (date, description, amount) {
            (Some(date), Some(description), Some(amount)) => Ok(Self {
                date,
                description,
                amount,
            }),
            _ => {
                let missing = [
                    (ColumnRole::Date, date),
                    (ColumnRole::Description, description),
                    (ColumnRole::Amount, amount),
                ]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(role, _)| role)
                .collect();
                Err(StatementParseError::UnrecognizedFormat { missing })
            }
        }
    }

    fn field<'a, S: AsRef<str>>(&self, row: &'a [S], role: ColumnRole) -> StatementResult<&'a str> {
        let idx = match role {
            ColumnRole::Date => self.date,
            ColumnRole::Description => self.description,
            ColumnRole::Amount => self.amount,
        };
        row.get(idx)
            .map(|s| s.as_ref())
            .ok_or(StatementParseError::MissingField { role })
    }

    /// Build one transaction from a data row.
    pub fn extract<S: AsRef<str>>(&self, row: &[S], rules: &CategoryRules) -> StatementResult<Transaction> {
        let date = StatementDate::from(self.field(row, ColumnRole::Date)?).parse()?;
        let amount = parse_amount(self.field(row, ColumnRole::Amount)?)?;
        let description = self.field(row, ColumnRole::Description)?.trim();
        let category = rules.categorize(description, amount);

        Ok(Transaction::new(date, description, amount, category))
    }
}
