use crate::errors::StatementParseError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a statement amount: `$` and thousands separators are dropped,
/// `+`/`-` signs are kept and accounting parentheses mean negative.
pub fn parse_amount(text: &str) -> Result<Decimal, StatementParseError> {
    let trimmed = text.trim();
    let invalid = || StatementParseError::NumberFormat(trimmed.to_string());

    let (negated, inner) = match trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = inner.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    if cleaned.is_empty() {
        return Err(invalid());
    }

    let value = Decimal::from_str(cleaned.trim()).map_err(|_| invalid())?;
    Ok(if negated { -value } else { value })
}
