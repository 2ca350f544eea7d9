use crate::compute::{Ledger, Summary};
use crate::sales::SalesReport;
use rust_decimal::Decimal;
use serde::Serialize;

/// One line of the monthly totals export, month as "YYYY-MM".
#[derive(Serialize)]
struct MonthlyRow {
    month: String,
    total: Decimal,
}

/// CSV export of the monthly debit totals, in calendar order. This is the
/// series the old dashboard drew its bar chart from.
pub(crate) fn write_monthly_totals<W: std::io::Write>(
    writer: W,
    ledger: &Ledger,
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (month, total) in &ledger.monthly_debits {
        wtr.serialize(MonthlyRow {
            month: month.to_string(),
            total: *total,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// The expenditure summary as plain text. Amounts are shown rounded to
/// whole naira, percentages to one decimal place.
pub(crate) fn write_summary<W: std::io::Write>(
    mut writer: W,
    summary: &Summary,
) -> Result<(), anyhow::Error> {
    writeln!(writer, "Expenditure Summary")?;
    writeln!(
        writer,
        "Total expenditure reached ₦{}, with Transfers at {}% and other categories at {}%.",
        summary.total_expenditure.round(),
        summary.transfers_pct,
        summary.others_pct,
    )?;
    match &summary.peak {
        Some((month, total)) => writeln!(
            writer,
            "Spending peaked in {} with ₦{} spent.",
            month.long_name(),
            total.round(),
        )?,
        None => writeln!(writer, "No debit transactions were found.")?,
    }
    writeln!(writer)?;
    writeln!(writer, "Category breakdown:")?;
    for (name, total) in &summary.categories {
        writeln!(writer, "  {name}: ₦{}", total.round())?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "Total credits over the period: ₦{}.",
        summary.credit_total.round()
    )?;
    Ok(())
}

fn winner(line: &mut impl std::io::Write, label: &str, top: &Option<(String, Decimal)>) -> std::io::Result<()> {
    match top {
        Some((name, total)) => writeln!(line, "{label}: {name} (${})", total.round_dp(2)),
        None => writeln!(line, "{label}: n/a"),
    }
}

/// The sales insight report as plain text.
pub(crate) fn write_sales_report<W: std::io::Write>(
    mut writer: W,
    report: &SalesReport,
) -> Result<(), anyhow::Error> {
    writeln!(writer, "Sales Insights Summary")?;
    writeln!(
        writer,
        "Total revenue: ${}.",
        report.total_revenue.round_dp(2)
    )?;
    winner(&mut writer, "Best performing region", &report.best_region)?;
    winner(&mut writer, "Most valuable customer", &report.top_customer)?;
    winner(&mut writer, "Top sales category", &report.top_category)?;
    winner(&mut writer, "Highest revenue day", &report.top_weekday)?;
    writeln!(
        writer,
        "Premium-tier sales from Gold VIP customers: {}.",
        report.premium_gold
    )?;
    if report.skipped_rows > 0 {
        writeln!(
            writer,
            "({} row(s) had unrecognized dates and were skipped.)",
            report.skipped_rows
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_monthly_totals, write_sales_report, write_summary};
    use crate::compute::{Categories, Ledger};
    use crate::data::{Entry, EntryKind::*};
    use crate::read::EntryUser;
    use crate::sales::SalesReport;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new(Categories::bank_default());
        let entries = [
            ((2025, 5, 2), "transfer to a", dec!(1500.50)),
            ((2025, 6, 1), "airtime", dec!(200.00)),
        ];
        for ((y, m, d), desc, amount) in entries {
            ledger
                .use_entry(Entry {
                    date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                    description: desc.to_string(),
                    amount,
                    kind: Debit,
                })
                .unwrap();
        }
        ledger
    }

    #[test]
    fn monthly_totals_csv() {
        let mut out = Vec::new();
        write_monthly_totals(&mut out, &sample_ledger()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "month,total\n2025-05,1500.50\n2025-06,200.00\n"
        );
    }

    #[test]
    fn summary_text() {
        let mut out = Vec::new();
        write_summary(&mut out, &sample_ledger().summarize()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total expenditure reached ₦1700"), "{text}");
        assert!(text.contains("Transfers at 88.2%"), "{text}");
        assert!(text.contains("peaked in May 2025"), "{text}");
        assert!(text.contains("Airtime: ₦200"), "{text}");
    }

    #[test]
    fn sales_report_text() {
        let report = SalesReport::build(&[], &HashMap::new(), 2);
        let mut out = Vec::new();
        write_sales_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Best performing region: n/a"), "{text}");
        assert!(text.contains("2 row(s)"), "{text}");
    }
}
