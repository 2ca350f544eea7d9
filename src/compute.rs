use crate::{
    data::{Entry, EntryKind, Error, Month},
    read::EntryUser,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A spending category and the description keywords that put a debit in it.
#[derive(Debug, Clone)]
pub(crate) struct Category {
    pub name: String,
    keywords: Vec<String>,
}

/// Ordered category set. Classification walks the list and the first
/// category with a matching keyword wins, so a description satisfying
/// several categories lands in the earliest-listed one. Anything that
/// matches nothing is reported under "Others".
#[derive(Debug, Clone)]
pub(crate) struct Categories(Vec<Category>);

impl Categories {
    pub fn new<S: AsRef<str>>(defs: &[(S, &[S])]) -> Self {
        Self(
            defs.iter()
                .map(|(name, keywords)| Category {
                    name: name.as_ref().to_string(),
                    keywords: keywords
                        .iter()
                        .map(|k| k.as_ref().to_lowercase())
                        .collect(),
                })
                .collect(),
        )
    }

    /// The categories used for the bank expenditure report.
    pub fn bank_default() -> Self {
        Self::new(&[
            ("Transfers", &["transfer to"][..]),
            ("Mobile Data", &["mobile data"][..]),
            ("Airtime", &["airtime"][..]),
            (
                "Bills & Levies",
                &["electricity", "sms", "electronic money transfer levy"][..],
            ),
        ])
    }

    fn classify(&self, description: &str) -> Option<usize> {
        let description = description.to_lowercase();
        self.0
            .iter()
            .position(|cat| cat.keywords.iter().any(|k| description.contains(k)))
    }
}

pub(crate) const OTHERS: &str = "Others";

/// Where statement entries end up. Credits are only totalled; debits are
/// additionally bucketed by calendar month and by category. Single-threaded
/// like the rest of the pipeline, one entry at a time.
#[derive(Debug)]
pub(crate) struct Ledger {
    categories: Categories,
    category_totals: Vec<Decimal>,
    others_total: Decimal,
    pub monthly_debits: BTreeMap<Month, Decimal>,
    pub credit_total: Decimal,
    pub debit_total: Decimal,
}

impl Ledger {
    pub fn new(categories: Categories) -> Self {
        let category_totals = vec![Decimal::ZERO; categories.0.len()];
        Self {
            categories,
            category_totals,
            others_total: Decimal::ZERO,
            monthly_debits: BTreeMap::new(),
            credit_total: Decimal::ZERO,
            debit_total: Decimal::ZERO,
        }
    }

    /// Category totals in declaration order. "Others" comes last and only
    /// shows up once something actually fell through.
    pub fn category_totals(&self) -> Vec<(&str, Decimal)> {
        let mut totals: Vec<(&str, Decimal)> = self
            .categories
            .0
            .iter()
            .zip(&self.category_totals)
            .map(|(cat, total)| (cat.name.as_str(), *total))
            .collect();
        if !self.others_total.is_zero() {
            totals.push((OTHERS, self.others_total));
        }
        totals
    }

    /// The numbers the report text is written from.
    pub fn summarize(&self) -> Summary {
        let total = self.debit_total;
        let transfers: Decimal = self
            .category_totals()
            .iter()
            .find(|(name, _)| *name == "Transfers")
            .map(|(_, t)| *t)
            .unwrap_or_default();
        let (transfers_pct, others_pct) = if total.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let transfers_pct = (transfers * Decimal::ONE_HUNDRED / total).round_dp(1);
            let others_pct = ((total - transfers) * Decimal::ONE_HUNDRED / total).round_dp(1);
            (transfers_pct, others_pct)
        };
        let peak = self
            .monthly_debits
            .iter()
            .max_by(|a, b| a.1.cmp(b.1))
            .map(|(month, total)| (*month, *total));
        Summary {
            total_expenditure: total,
            credit_total: self.credit_total,
            transfers_pct,
            others_pct,
            peak,
            categories: self
                .category_totals()
                .into_iter()
                .map(|(name, total)| (name.to_string(), total))
                .collect(),
        }
    }
}

/// Everything the rendered summary needs, already derived. Percentages are
/// rounded to one decimal place; `peak` is absent when no debit was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub total_expenditure: Decimal,
    pub credit_total: Decimal,
    pub transfers_pct: Decimal,
    pub others_pct: Decimal,
    pub peak: Option<(Month, Decimal)>,
    pub categories: Vec<(String, Decimal)>,
}

impl EntryUser for Ledger {
    fn use_entry(&mut self, entry: Entry) -> Result<(), Error> {
        match entry.kind {
            EntryKind::Credit => self.credit_total += entry.amount,
            EntryKind::Debit => {
                self.debit_total += entry.amount;
                *self
                    .monthly_debits
                    .entry(Month::from(entry.date))
                    .or_default() += entry.amount;
                match self.categories.classify(&entry.description) {
                    Some(i) => self.category_totals[i] += entry.amount,
                    None => self.others_total += entry.amount,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Categories, Ledger};
    use crate::data::{Entry, EntryKind::*, Month};
    use crate::read::EntryUser;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn debit(date: (i32, u32, u32), description: &str, amount: rust_decimal::Decimal) -> Entry {
        Entry {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: description.to_string(),
            amount,
            kind: Debit,
        }
    }

    fn ledger_with(entries: Vec<Entry>) -> Ledger {
        let mut ledger = Ledger::new(Categories::bank_default());
        for entry in entries {
            ledger.use_entry(entry).unwrap();
        }
        ledger
    }

    #[test]
    fn monthly_bucketing() {
        let ledger = ledger_with(vec![
            debit((2025, 5, 2), "transfer to a", dec!(100)),
            debit((2025, 5, 30), "transfer to b", dec!(50)),
            debit((2025, 6, 1), "airtime", dec!(25)),
            debit((2024, 12, 31), "electricity", dec!(10)),
        ]);
        let months: Vec<(String, _)> = ledger
            .monthly_debits
            .iter()
            .map(|(m, t)| (m.to_string(), *t))
            .collect();
        assert_eq!(
            months,
            [
                ("2024-12".to_string(), dec!(10)),
                ("2025-05".to_string(), dec!(150)),
                ("2025-06".to_string(), dec!(25)),
            ]
        );
        assert_eq!(ledger.debit_total, dec!(185));
    }

    #[test]
    fn category_classification() {
        let ledger = ledger_with(vec![
            debit((2025, 5, 1), "transfer to john", dec!(100)),
            debit((2025, 5, 2), "mobile data bundle", dec!(20)),
            debit((2025, 5, 3), "airtime top-up", dec!(10)),
            debit((2025, 5, 4), "electronic money transfer levy", dec!(5)),
            debit((2025, 5, 5), "cash withdrawal at atm", dec!(40)),
        ]);
        assert_eq!(
            ledger.category_totals(),
            [
                ("Transfers", dec!(100)),
                ("Mobile Data", dec!(20)),
                ("Airtime", dec!(10)),
                ("Bills & Levies", dec!(5)),
                ("Others", dec!(40)),
            ]
        );
    }

    #[test]
    fn first_matching_category_wins() {
        let ledger = ledger_with(vec![debit(
            (2025, 5, 1),
            "transfer to electricity company",
            dec!(75),
        )]);
        assert_eq!(ledger.category_totals()[0], ("Transfers", dec!(75)));
        assert_eq!(ledger.category_totals()[3], ("Bills & Levies", dec!(0)));
    }

    #[test]
    fn others_hidden_when_empty() {
        let ledger = ledger_with(vec![debit((2025, 5, 1), "airtime", dec!(10))]);
        assert!(ledger
            .category_totals()
            .iter()
            .all(|(name, _)| *name != "Others"));
    }

    #[test]
    fn credits_do_not_touch_debit_buckets() {
        let mut ledger = Ledger::new(Categories::bank_default());
        ledger
            .use_entry(Entry {
                date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                description: "salary".to_string(),
                amount: dec!(1000),
                kind: Credit,
            })
            .unwrap();
        assert_eq!(ledger.credit_total, dec!(1000));
        assert_eq!(ledger.debit_total, dec!(0));
        assert!(ledger.monthly_debits.is_empty());
    }

    #[test]
    fn summary_percentages_and_peak() {
        let ledger = ledger_with(vec![
            debit((2025, 5, 1), "transfer to john", dec!(600)),
            debit((2025, 6, 1), "airtime", dec!(150)),
            debit((2025, 6, 2), "mobile data", dec!(250)),
        ]);
        let summary = ledger.summarize();
        assert_eq!(summary.total_expenditure, dec!(1000));
        assert_eq!(summary.transfers_pct, dec!(60.0));
        assert_eq!(summary.others_pct, dec!(40.0));
        let (peak_month, peak_total) = summary.peak.unwrap();
        assert_eq!(peak_month, Month { year: 2025, month: 5 });
        assert_eq!(peak_total, dec!(600));
    }

    #[test]
    fn empty_ledger_summary() {
        let ledger = Ledger::new(Categories::bank_default());
        let summary = ledger.summarize();
        assert_eq!(summary.total_expenditure, dec!(0));
        assert_eq!(summary.transfers_pct, dec!(0));
        assert_eq!(summary.others_pct, dec!(0));
        assert!(summary.peak.is_none());
    }
}
