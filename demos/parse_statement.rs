use statement_analyzer_rs::ParserBuilder;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Check if a file path was provided as a command-line argument
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example CSV data from demos/sample.csv\n");
        "demos/sample.csv"
    };

    // .txt holds text already pulled out of a PDF
    let mut builder = ParserBuilder::new().filename(file_path);
    if file_path.ends_with(".txt") {
        builder = builder.mime_type("application/pdf");
    }
    let statement = builder.parse()?;

    if let Some(period) = statement.period() {
        println!("Period: {} to {}", period.start, period.end);
    }
    println!(
        "Found {} transactions ({} skipped)\n",
        statement.transactions().len(),
        statement.skipped_records()
    );

    for (i, tx) in statement.transactions().iter().take(10).enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {}", tx.date);
        println!("  Description: {}", tx.description);
        println!("  Amount: {}", tx.amount);
        println!("  Category: {}", tx.category);
        println!();
    }

    if statement.transactions().len() > 10 {
        println!("... and {} more transactions", statement.transactions().len() - 10);
    }

    println!("Income:   {}", statement.total_income());
    println!("Expenses: {}", statement.total_expenses());
    println!("Net:      {}", statement.net_change());

    Ok(())
}
