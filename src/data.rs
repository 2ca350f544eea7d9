use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// A statement row as it sits in the bank export, before any cleaning.
/// The amount keeps its thousands separators and sign here; `read` turns
/// this into an `Entry` or skips it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(rename = "Trans. Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Debit/Credit(₦)")]
    pub amount: String,
}

/// A cleaned statement entry: normalized date, lowercased description,
/// positive amount, with the sign folded into `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Credit,
    Debit,
}

/// A calendar month, the bucket key for monthly aggregation. Ordered
/// chronologically so a `BTreeMap` keyed on it iterates in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Month {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Month {
    /// Human-readable form, e.g. "October 2025", for the summary text.
    pub fn long_name(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Row-level problems. None of these are fatal: the reader logs them,
/// bumps a counter and moves on to the next record. Structural problems
/// (missing file, broken CSV) stay with `anyhow` at the binary boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unrecognized date format {0:?}")]
    UnrecognizedDate(String),
    #[error("unparseable amount {0:?}")]
    BadAmount(String),
}
