use compute::{Categories, Ledger};
use read::{read_statement, DescriptionFilter};
use sales::{read_sales, read_vip, SalesReport};
use std::collections::HashMap;
use tracing::info;
use write::{write_monthly_totals, write_sales_report, write_summary};

mod compute;
mod data;
mod datefmt;
mod read;
mod sales;
mod write;

fn main() -> Result<(), anyhow::Error> {
    // reports go to stdout, row-skip warnings to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args: Vec<String> = std::env::args().collect();
    match (args.get(1).map(String::as_str), args.len()) {
        (Some("statement"), 3 | 4) => {
            let mut ledger = Ledger::new(Categories::bank_default());
            let stats = read_statement(
                std::fs::File::open(&args[2])?,
                &DescriptionFilter::bank_default(),
                &mut ledger,
            )?;
            info!(?stats, "statement ingested");
            if let Some(path) = args.get(3) {
                write_monthly_totals(std::fs::File::create(path)?, &ledger)?;
            }
            write_summary(std::io::stdout(), &ledger.summarize())?;
        }
        (Some("sales"), 3 | 4) => {
            let (sales, skipped) = read_sales(std::fs::File::open(&args[2])?)?;
            let vip = match args.get(3) {
                Some(path) => read_vip(std::fs::File::open(path)?)?,
                None => HashMap::new(),
            };
            let report = SalesReport::build(&sales, &vip, skipped);
            write_sales_report(std::io::stdout(), &report)?;
        }
        _ => anyhow::bail!(
            "usage: {0} statement <statement.csv> [monthly-totals.csv]\n       {0} sales <sales.csv> [vip.csv]",
            args[0]
        ),
    }
    Ok(())
}
