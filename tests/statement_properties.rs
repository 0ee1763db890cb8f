use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use statement_analyzer_rs::{
    Category, CategoryRules, FileFormat, ParserBuilder, Statement, Totals,
    errors::StatementParseError, export, insights,
};
use std::str::FromStr;

const SAMPLE_CSV: &str = include_str!("../demos/sample.csv");
const SAMPLE_TEXT: &str = include_str!("../demos/sample_statement.txt");

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn parse(content: &str, format: FileFormat) -> Statement {
    ParserBuilder::new()
        .content(content)
        .format(format)
        .reference_date(date(2024, 6, 15))
        .parse()
        .unwrap()
}

#[rstest]
#[case(FileFormat::Csv, SAMPLE_CSV)]
#[case(FileFormat::Pdf, SAMPLE_TEXT)]
fn totals_match_a_fresh_fold(#[case] format: FileFormat, #[case] content: &str) {
    let statement = parse(content, format);
    let sum: Decimal = statement.category_totals().values().copied().sum();

    assert_eq!(statement.totals(), &Totals::fold(statement.transactions()).unwrap());
    assert_eq!(sum, statement.total_income() + statement.total_expenses());
    assert!(statement.total_expenses() <= Decimal::ZERO);
    assert!(statement.total_income() >= Decimal::ZERO);
}

#[rstest]
#[case(FileFormat::Csv, SAMPLE_CSV)]
#[case(FileFormat::Pdf, SAMPLE_TEXT)]
fn positive_amounts_are_income(#[case] format: FileFormat, #[case] content: &str) {
    let statement = parse(content, format);

    for txn in statement.transactions() {
        assert_eq!(txn.amount > Decimal::ZERO, txn.category == Category::Income);
    }
}

#[test]
fn csv_and_pdf_text_agree_on_shared_rows() {
    let csv = parse(SAMPLE_CSV, FileFormat::Csv);
    let pdf = parse(SAMPLE_TEXT, FileFormat::Pdf);

    for txn in pdf.transactions() {
        assert!(
            csv.transactions().contains(txn),
            "{txn:?} missing from the CSV import"
        );
    }
}

#[test]
fn csv_period_spans_parsed_dates() {
    let statement = parse(SAMPLE_CSV, FileFormat::Csv);

    assert_eq!(statement.start_date(), Some(date(2024, 3, 1)));
    assert_eq!(statement.end_date(), Some(date(2024, 3, 22)));
    assert_eq!(statement.skipped_records(), 1);
    assert_eq!(statement.transactions().len(), 9);
    assert!(
        statement
            .transactions()
            .iter()
            .all(|t| statement.period().unwrap().contains(t.date))
    );
}

#[test]
fn pdf_text_categories() {
    let statement = parse(SAMPLE_TEXT, FileFormat::Pdf);
    let categories: Vec<Category> = statement.transactions().iter().map(|t| t.category).collect();

    assert_eq!(
        categories,
        vec![
            Category::Income,
            Category::Groceries,
            Category::Transportation,
            Category::Entertainment,
            Category::Housing,
            Category::Dining,
        ]
    );
    assert_eq!(statement.net_change(), dec("1500.62"));
}

#[test]
fn pdf_text_without_period_uses_reference_month() {
    let statement = parse("03/02/2024  Whole Foods Market  -82.14\n", FileFormat::Pdf);

    assert_eq!(statement.start_date(), Some(date(2024, 6, 1)));
    assert_eq!(statement.end_date(), Some(date(2024, 6, 30)));
}

#[test]
fn csv_without_amount_column_is_rejected() {
    let result = ParserBuilder::new()
        .content("Date,Payee,Balance\n03/01/2024,Foo,1.00\n")
        .mime_type("text/csv")
        .parse();

    assert!(matches!(
        result,
        Err(StatementParseError::UnrecognizedFormat { .. })
    ));
}

#[test]
fn custom_rules_take_precedence_in_order() {
    let rules = CategoryRules::from_json(
        r#"[
            {"keyword": "whole foods", "category": "Dining"},
            {"keyword": "food", "category": "Health"}
        ]"#,
    )
    .unwrap();

    let statement = ParserBuilder::new()
        .content(SAMPLE_CSV)
        .filename("march.csv")
        .rules(rules)
        .parse()
        .unwrap();

    let whole_foods = statement
        .transactions()
        .iter()
        .find(|t| t.description == "Whole Foods Market")
        .unwrap();
    assert_eq!(whole_foods.category, Category::Dining);
    assert_eq!(
        statement.transactions().iter().filter(|t| t.category == Category::Miscellaneous).count(),
        7
    );
}

#[test]
fn json_export_round_trips_through_storage() {
    let statements = vec![
        parse(SAMPLE_CSV, FileFormat::Csv),
        parse(SAMPLE_TEXT, FileFormat::Pdf),
    ];

    let restored = export::from_json(&export::to_json(&statements).unwrap()).unwrap();

    assert_eq!(restored.len(), 2);
    for (before, after) in statements.iter().zip(&restored) {
        assert_eq!(before.period(), after.period());
        assert_eq!(before.transactions(), after.transactions());
        assert_eq!(before.totals(), after.totals());
    }
}

#[test]
fn summary_over_both_imports() {
    let statements = vec![
        parse(SAMPLE_CSV, FileFormat::Csv),
        parse(SAMPLE_TEXT, FileFormat::Pdf),
    ];
    let top = insights::top_expense_categories(&statements, 1);

    assert_eq!(top, vec![(Category::Housing, dec("-2900.00"))]);
    assert!(
        insights::FinancialSummary::from_statements(&statements, 3)
            .to_string()
            .contains("- Housing: $2900.00")
    );
}
