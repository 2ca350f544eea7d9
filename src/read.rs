use crate::data::{Entry, EntryKind, Error, RawRecord};
use crate::datefmt::normalize_date;
use rust_decimal::Decimal;
use tracing::warn;

/// Trait for doing something with an `Entry` read from a statement CSV.
/// The aggregation logic in `compute` plugs in here, and mock impls let the
/// tests check the reader on its own.
pub(crate) trait EntryUser {
    fn use_entry(&mut self, entry: Entry) -> Result<(), Error>;
}

/// Descriptions matching any of these (case-insensitive substring) are
/// internal account shuffling, not real spending, and get dropped before
/// aggregation.
#[derive(Debug, Clone)]
pub(crate) struct DescriptionFilter {
    keywords: Vec<String>,
}

impl DescriptionFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The noise present in the sample bank export.
    pub fn bank_default() -> Self {
        Self::new(&["owealth withdrawal", "card", "save"])
    }

    pub fn matches(&self, description: &str) -> bool {
        let description = description.to_lowercase();
        self.keywords.iter().any(|k| description.contains(k))
    }
}

/// How many rows the reader dropped, and why. Zero-amount rows are neither
/// credit nor debit so they are skipped without comment, same as the
/// original export tooling did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReadStats {
    pub filtered: usize,
    pub unparseable_date: usize,
    pub bad_amount: usize,
    pub zero_amount: usize,
}

/// Amounts come out of the export with thousands separators ("1,500.00").
fn parse_amount(raw: &str) -> Result<Decimal, Error> {
    raw.replace(',', "")
        .parse::<Decimal>()
        .map_err(|_| Error::BadAmount(raw.to_string()))
}

/// CSV importer for statement entries. Structural CSV problems abort the
/// read; per-row problems are logged, counted and skipped.
pub(crate) fn read_statement<R: std::io::Read, U: EntryUser>(
    reader: R,
    filter: &DescriptionFilter,
    user: &mut U,
) -> Result<ReadStats, anyhow::Error> {
    let mut stats = ReadStats::default();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    for result in rdr.deserialize() {
        let raw: RawRecord = result?;
        if filter.matches(&raw.description) {
            stats.filtered += 1;
            continue;
        }
        let Some(date) = normalize_date(raw.date.trim()) else {
            stats.unparseable_date += 1;
            warn!("skipping row: {}", Error::UnrecognizedDate(raw.date));
            continue;
        };
        let amount = match parse_amount(&raw.amount) {
            Ok(amount) => amount,
            Err(e) => {
                stats.bad_amount += 1;
                warn!("skipping row: {e}");
                continue;
            }
        };
        if amount.is_zero() {
            stats.zero_amount += 1;
            continue;
        }
        let kind = if amount.is_sign_negative() {
            EntryKind::Debit
        } else {
            EntryKind::Credit
        };
        let entry = Entry {
            date,
            description: raw.description.to_lowercase(),
            amount: amount.abs(),
            kind,
        };
        if let Err(e) = user.use_entry(entry) {
            warn!("entry rejected: {e}");
        }
    }
    Ok(stats)
}
