use statement_analyzer_rs::{CategoryRules, ParserBuilder, export, insights::FinancialSummary};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let paths: Vec<&str> = if args.len() > 1 {
        args[1..].iter().map(String::as_str).collect()
    } else {
        println!("Using demos/sample.csv and demos/sample_statement.txt\n");
        vec!["demos/sample.csv", "demos/sample_statement.txt"]
    };

    let rules = match env::var("CATEGORY_RULES") {
        Ok(path) => CategoryRules::from_json(&std::fs::read_to_string(path)?)?,
        Err(_) => CategoryRules::default(),
    };

    let mut statements = Vec::new();
    for path in paths {
        let mut builder = ParserBuilder::new().filename(path).rules(rules.clone());
        if path.ends_with(".txt") {
            builder = builder.mime_type("application/pdf");
        }
        statements.push(builder.parse()?);
    }

    println!("{}", FinancialSummary::from_statements(&statements, 5));

    println!("CSV export:");
    export::write_csv(&statements, std::io::stdout())?;

    Ok(())
}
