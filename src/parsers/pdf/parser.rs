use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::{Captures, Regex};

use crate::{
    categories::CategoryRules,
    errors::StatementResult,
    parsers::{
        amount::parse_amount,
        date::parse_date,
        traits::{ParseOptions, Parser},
    },
    types::{Statement, StatementPeriod, Transaction},
};

/// Dates accepted around "statement period": `Jan 1, 2024`, `01/01/2024`, `01-01-2024`, `2024-01-01`.
const PERIOD_DATE: &str = r"[a-z]{3,9}\s*\d{1,2},?\s*\d{4}|\d{1,2}[/-]\d{1,2}[/-]\d{4}|\d{4}-\d{2}-\d{2}";

static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)statement\s+period:?\s*(?P<start>{PERIOD_DATE})\s*(?:to|-)\s*(?P<end>{PERIOD_DATE})"
    ))
    .expect("statement period pattern is valid")
});

// DATE DESCRIPTION AMOUNT, one line each; a trailing balance column is ignored.
// Amounts in accounting parentheses are negative.
static TXN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?P<date>\d{1,2}[/-]\d{1,2}[/-]\d{2,4})[ \t]+",
        r"(?P<desc>[\w &.,'/#*\-]+?)[ \t]+",
        r"(?P<amount>[-+]?\$?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}\b",
        r"|\(\$?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}\))",
    ))
    .expect("transaction line pattern is valid")
});

/// Extracts transactions from the plain text of a PDF statement.
///
/// Binary PDF decoding happens upstream; this parser only sees text.
pub struct PdfParser;

impl PdfParser {
    /// First "statement period" whose two dates both parse.
    pub fn statement_period(text: &str) -> Option<StatementPeriod> {
        PERIOD_RE.captures_iter(text).find_map(|caps| {
            let start = parse_date(&caps["start"]).ok()?;
            let end = parse_date(&caps["end"]).ok()?;
            Some(StatementPeriod::new(start, end))
        })
    }

    fn line_transaction(caps: &Captures<'_>, rules: &CategoryRules) -> StatementResult<Transaction> {
        let date = parse_date(&caps["date"])?;
        let amount = parse_amount(&caps["amount"])?;
        let description = caps["desc"].trim();
        let category = rules.categorize(description, amount);

        Ok(Transaction::new(date, description, amount, category))
    }
}

impl Parser for PdfParser {
    const MIME_TYPES: &'static [&'static str] = &["application/pdf"];
    const EXTENSIONS: &'static [&'static str] = &["pdf"];

    fn parse(content: &str, options: &ParseOptions) -> StatementResult<Statement> {
        let period = Self::statement_period(content).unwrap_or_else(|| {
            warn!(
                "No statement period found, using the month of {}",
                options.reference_date
            );
            StatementPeriod::month_of(options.reference_date)
        });

        let mut statement = Statement::new(Some(period));
        let mut skipped = 0;

        for caps in TXN_RE.captures_iter(content) {
            if let Err(e) = Self::line_transaction(&caps, &options.rules).and_then(|txn| statement.push(txn)) {
                debug!("Skipping statement line {:?}: {}", &caps[0], e);
                skipped += 1;
            }
        }

        info!(
            "Parsed {} PDF transactions ({} lines skipped)",
            statement.transactions().len(),
            skipped
        );
        Ok(statement.with_skipped(skipped))
    }
}
