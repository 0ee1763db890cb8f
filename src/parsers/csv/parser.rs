use super::dto::ColumnMap;
use crate::{
    categories::CategoryRules,
    errors::StatementResult,
    parsers::traits::{ParseOptions, Parser},
    types::{Statement, StatementPeriod},
};
use csv::ReaderBuilder;
use log::{debug, info};

pub struct CsvParser;

impl CsvParser {
    /// Extract a statement from an already tokenized header row and data rows.
    ///
    /// Rows whose date, amount or length is unusable, or whose amount would
    /// overflow the totals, are skipped and counted.
    /// The period spans the earliest to the latest parsed date; no parsed rows
    /// means an empty statement.
    pub fn parse_records<H, R, S>(
        headers: &[H],
        rows: impl IntoIterator<Item = R>,
        rules: &CategoryRules,
    ) -> StatementResult<Statement>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = ColumnMap::infer(headers)?;

        let mut period: Option<StatementPeriod> = None;
        let mut statement = Statement::new(None);
        let mut skipped = 0;

        for (line, row) in rows.into_iter().enumerate() {
            let fields: Vec<S> = row.into_iter().collect();
            let pushed = columns.extract(&fields, rules).and_then(|txn| {
                let date = txn.date;
                statement.push(txn)?;
                Ok(date)
            });
            match pushed {
                Ok(date) => match period.as_mut() {
                    Some(p) => p.extend(date),
                    None => period = Some(StatementPeriod::new(date, date)),
                },
                Err(e) if e.is_record_level() => {
                    // +2: 1-based, after the header row
                    debug!("Skipping CSV row {}: {}", line + 2, e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let statement = statement.with_period(period).with_skipped(skipped);
        info!(
            "Parsed {} CSV transactions ({} rows skipped)",
            statement.transactions().len(),
            skipped
        );
        Ok(statement)
    }
}

impl Parser for CsvParser {
    const MIME_TYPES: &'static [&'static str] = &["text/csv", "application/vnd.ms-excel"];
    const EXTENSIONS: &'static [&'static str] = &["csv"];

    fn parse(content: &str, options: &ParseOptions) -> StatementResult<Statement> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;

        let headers: Vec<&str> = headers.iter().collect();
        Self::parse_records(&headers, &records, &options.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;
    use crate::errors::StatementParseError;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_CSV: &str = r#"Date,Merchant,Amount
03/15/2024,Starbucks Coffee,-4.50
03/01/2024,ACME Corp Payroll,"$2,500.00"
13/45/2024,Broken Row,-10.00
2024-03-20,Monthly Rent,"-1,200.00"
03/18/2024,Mystery Charge,abc
Mar 5, 2024,Amazon Marketplace,-25.99
"#;

    fn options() -> ParseOptions {
        ParseOptions::new(
            CategoryRules::default(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case(Some("test.csv"), None, true)]
    #[case(Some("TEST.CSV"), None, true)]
    #[case(None, Some("text/csv"), true)]
    #[case(None, Some("text/csv; charset=utf-8"), true)]
    #[case(None, Some("application/vnd.ms-excel"), true)]
    #[case(Some("test.pdf"), None, false)]
    #[case(None, Some("application/pdf"), false)]
    #[case(Some("csv"), None, false)]
    #[case(None, None, false)]
    fn test_is_supported(
        #[case] filename: Option<&str>,
        #[case] mime_type: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(CsvParser::is_supported(filename, mime_type), expected);
    }

    #[test]
    fn test_single_row_from_records() {
        let statement = CsvParser::parse_records(
            &["Date", "Merchant", "Amount"],
            [["03/15/2024", "Starbucks Coffee", "-4.50"]],
            &CategoryRules::default(),
        )
        .unwrap();

        assert_eq!(statement.transactions().len(), 1);
        let txn = &statement.transactions()[0];
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(txn.description, "Starbucks Coffee");
        assert_eq!(txn.amount, dec("-4.50"));
        assert_eq!(txn.category, Category::Dining);
    }

    #[test]
    fn test_parse_skips_bad_rows() {
        let statement = CsvParser::parse(SAMPLE_CSV, &options()).unwrap();

        // unquoted "Mar 5, 2024" splits in two cells, leaving "Mar 5" as the date
        let descriptions: Vec<&str> = statement
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec!["Starbucks Coffee", "ACME Corp Payroll", "Monthly Rent"]
        );
        assert_eq!(statement.skipped_records(), 3);
    }

    #[test]
    fn test_parse_period_is_min_max_date() {
        let statement = CsvParser::parse(SAMPLE_CSV, &options()).unwrap();
        assert_eq!(
            statement.period(),
            Some(StatementPeriod::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            ))
        );
    }

    #[test]
    fn test_parse_totals() {
        let statement = CsvParser::parse(SAMPLE_CSV, &options()).unwrap();

        assert_eq!(statement.total_income(), dec("2500.00"));
        assert_eq!(statement.total_expenses(), dec("-1204.50"));
        assert_eq!(statement.category_totals()[&Category::Income], dec("2500.00"));
        assert_eq!(statement.category_totals()[&Category::Housing], dec("-1200.00"));
        assert_eq!(statement.totals(), &statement.recompute_totals().unwrap());
    }

    #[test]
    fn test_parse_missing_amount_column() {
        let csv = "Date,Merchant,Balance\n03/15/2024,Starbucks,100.00\n";
        let result = CsvParser::parse(csv, &options());
        assert!(matches!(
            result,
            Err(StatementParseError::UnrecognizedFormat { .. })
        ));
    }

    #[test]
    fn test_parse_no_valid_rows_is_empty_statement() {
        let csv = "Date,Description,Amount\nnot a date,Foo,-1.00\n";
        let statement = CsvParser::parse(csv, &options()).unwrap();

        assert!(statement.is_empty());
        assert_eq!(statement.period(), None);
        assert_eq!(statement.skipped_records(), 1);
    }

    #[test]
    fn test_parse_header_only() {
        let statement = CsvParser::parse("Date,Payee,Amount\n", &options()).unwrap();
        assert!(statement.is_empty());
        assert_eq!(statement.skipped_records(), 0);
    }

    #[test]
    fn test_overflowing_row_is_skipped() {
        let statement = CsvParser::parse_records(
            &["Date", "Description", "Amount"],
            [
                ["03/01/2024", "Wire", "-79228162514264337593543950335"],
                ["03/02/2024", "Wire", "-1"],
                ["03/03/2024", "Payroll", "100.00"],
            ],
            &CategoryRules::default(),
        )
        .unwrap();

        assert_eq!(statement.transactions().len(), 2);
        assert_eq!(statement.skipped_records(), 1);
        assert_eq!(statement.total_expenses(), Decimal::MIN);
        assert_eq!(statement.total_income(), dec("100.00"));
        // the skipped row's date does not widen the period
        assert_eq!(
            statement.period(),
            Some(StatementPeriod::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            ))
        );
    }
}
