use chrono::NaiveDate;

use crate::{categories::CategoryRules, errors::StatementResult, types::Statement};

/// Settings shared by every extractor for one import.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub rules: CategoryRules,
    /// "Today" for the current-month fallback when a statement period is missing.
    pub reference_date: NaiveDate,
}

impl ParseOptions {
    pub fn new(rules: CategoryRules, reference_date: NaiveDate) -> Self {
        Self {
            rules,
            reference_date,
        }
    }
}

pub trait Parser {
    /// MIME types handled by this parser, lower case, without parameters.
    const MIME_TYPES: &'static [&'static str];
    const EXTENSIONS: &'static [&'static str];

    fn parse(content: &str, options: &ParseOptions) -> StatementResult<Statement>;

    fn supports_mime(mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        Self::MIME_TYPES.contains(&essence.as_str())
    }

    fn supports_extension(filename: &str) -> bool {
        let name = filename.to_lowercase();
        Self::EXTENSIONS
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")))
    }

    fn is_supported(filename: Option<&str>, mime_type: Option<&str>) -> bool {
        mime_type.is_some_and(Self::supports_mime) || filename.is_some_and(Self::supports_extension)
    }
}
