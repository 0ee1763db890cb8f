use crate::errors::StatementParseError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Formatos aceitos, na ordem em que são tentados. O primeiro que funcionar vence.
///
/// - MM/dd/yyyy
/// - MM-dd-yyyy
/// - yyyy-MM-dd
/// - MMM dd, yyyy (nomes de mês em inglês; `%B` aceita "Jan" e "January")
pub const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%m-%d-%Y", "%Y-%m-%d", "%B %d, %Y"];

/// Formato usado nas exportações (CSV e JSON).
pub const EXPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Representa uma data bruta extraída de um extrato (linha de PDF ou célula CSV).
///
/// Centraliza a normalização: a string original é guardada e só vira
/// `NaiveDate` na conversão.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementDate(String);

impl StatementDate {
    /// Tenta converter a string para `NaiveDate` usando `DATE_FORMATS` em ordem
    pub fn parse(&self) -> Result<NaiveDate, StatementParseError> {
        // Texto extraído de PDF costuma ter espaços duplicados ("Jan  1, 2024")
        let s = self.0.split_whitespace().collect::<Vec<_>>().join(" ");

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&s, fmt).ok())
            .ok_or(StatementParseError::UnparseableDate(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StatementDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementDate> for NaiveDate {
    type Error = StatementParseError;

    fn try_from(date: StatementDate) -> Result<Self, Self::Error> {
        date.parse()
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, StatementParseError> {
    StatementDate::from(text).parse()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(EXPORT_DATE_FORMAT).to_string()
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
