use crate::data::Error;
use crate::datefmt::normalize_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// A sales CSV row before cleaning. `price` deserializes straight into a
/// `Decimal`; the date stays a string until the normalizer has had a go.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct RawSale {
    date: String,
    customer: String,
    category: String,
    region: String,
    price: Decimal,
    quantity: u32,
}

/// One VIP roster row, merged into sales by customer name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct VipRow {
    customer: String,
    vip_level: String,
}

/// Spend tier per sale, from the per-row revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    Premium,
    Mid,
    Budget,
}

impl Tier {
    pub fn from_total(total: Decimal) -> Self {
        if total >= Decimal::from(200) {
            Tier::Premium
        } else if total >= Decimal::from(100) {
            Tier::Mid
        } else {
            Tier::Budget
        }
    }
}

/// Region codes as they appear in the export. Unknown codes stay visible
/// in the aggregates instead of being dropped.
fn region_name(code: &str) -> &'static str {
    match code {
        "CA" => "California",
        "NY" => "New York",
        "TX" => "Texas",
        "WA" => "Washington",
        _ => "Unknown",
    }
}

/// A cleaned sale: normalized date, mapped region, derived revenue and tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sale {
    pub date: NaiveDate,
    pub customer: String,
    pub category: String,
    pub region: String,
    pub total: Decimal,
    pub tier: Tier,
}

impl Sale {
    /// Weekday name ("Friday") for the weekday revenue grouping.
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }
}

/// CSV importer for sales rows. Same row policy as the statement reader:
/// a date the normalizer doesn't recognize drops the row with a warning,
/// anything structurally broken aborts.
pub(crate) fn read_sales<R: std::io::Read>(
    reader: R,
) -> Result<(Vec<Sale>, usize), anyhow::Error> {
    let mut sales = Vec::new();
    let mut skipped = 0;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    for result in rdr.deserialize() {
        let raw: RawSale = result?;
        let Some(date) = normalize_date(raw.date.trim()) else {
            skipped += 1;
            warn!("skipping sale: {}", Error::UnrecognizedDate(raw.date));
            continue;
        };
        let total = raw.price * Decimal::from(raw.quantity);
        sales.push(Sale {
            date,
            customer: raw.customer,
            category: raw.category,
            region: region_name(&raw.region).to_string(),
            tier: Tier::from_total(total),
            total,
        });
    }
    Ok((sales, skipped))
}

/// Reads the VIP roster into a customer -> level map.
pub(crate) fn read_vip<R: std::io::Read>(
    reader: R,
) -> Result<HashMap<String, String>, anyhow::Error> {
    let mut levels = HashMap::new();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    for result in rdr.deserialize() {
        let row: VipRow = result?;
        levels.insert(row.customer, row.vip_level);
    }
    Ok(levels)
}

/// Sums revenue per key and returns the best one. Ties go to the
/// alphabetically last key, which is at least deterministic.
fn top_by<F>(sales: &[Sale], key: F) -> Option<(String, Decimal)>
where
    F: Fn(&Sale) -> String,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for sale in sales {
        *totals.entry(key(sale)).or_default() += sale.total;
    }
    totals
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1))
}

/// The headline numbers of the sales report. Every `Option` is `None` on
/// empty input; the renderer says so instead of inventing winners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SalesReport {
    pub total_revenue: Decimal,
    pub best_region: Option<(String, Decimal)>,
    pub top_customer: Option<(String, Decimal)>,
    pub top_category: Option<(String, Decimal)>,
    pub top_weekday: Option<(String, Decimal)>,
    pub premium_gold: usize,
    pub skipped_rows: usize,
}

impl SalesReport {
    pub fn build(sales: &[Sale], vip: &HashMap<String, String>, skipped_rows: usize) -> Self {
        let premium_gold = sales
            .iter()
            .filter(|s| {
                s.tier == Tier::Premium
                    && vip
                        .get(&s.customer)
                        .is_some_and(|level| level.eq_ignore_ascii_case("gold"))
            })
            .count();
        Self {
            total_revenue: sales.iter().map(|s| s.total).sum(),
            best_region: top_by(sales, |s| s.region.clone()),
            top_customer: top_by(sales, |s| s.customer.clone()),
            top_category: top_by(sales, |s| s.category.clone()),
            top_weekday: top_by(sales, Sale::weekday),
            premium_gold,
            skipped_rows,
        }
    }
}
