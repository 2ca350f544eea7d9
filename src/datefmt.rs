use chrono::{NaiveDate, NaiveDateTime};

/// A candidate date shape. Formats carrying a time-of-day have to go through
/// `NaiveDateTime` and get truncated to the date afterwards; chrono refuses to
/// parse a datetime format into a bare `NaiveDate`.
enum Shape {
    DateOnly(&'static str),
    WithTime(&'static str),
}

impl Shape {
    fn parse(&self, input: &str) -> Option<NaiveDate> {
        match self {
            Shape::DateOnly(fmt) => NaiveDate::parse_from_str(input, fmt).ok(),
            Shape::WithTime(fmt) => NaiveDateTime::parse_from_str(input, fmt)
                .ok()
                .map(|dt| dt.date()),
        }
    }
}

/// Day-first conventions, the ones the bank export actually uses.
/// Tried first, in order.
const DAY_FIRST: &[Shape] = &[
    Shape::WithTime("%d %b %Y %H:%M:%S"),
    Shape::DateOnly("%d %b %Y"),
    Shape::DateOnly("%d/%m/%Y"),
];

/// Year-first conventions, tried only after every day-first format has
/// failed. Relative order inside the list matters: the first match wins.
const YEAR_FIRST: &[Shape] = &[
    Shape::WithTime("%Y-%m-%d %H:%M:%S"),
    Shape::WithTime("%Y %b %d %H:%M:%S"),
    Shape::DateOnly("%Y-%b-%d"),
    Shape::DateOnly("%Y-%m-%d"),
];

/// Turns a free-form date string into a calendar date, or `None` when no
/// known format applies. An unparseable string is an expected outcome here,
/// not an error: callers decide whether to skip the record, count it, or
/// complain. Whatever time component the input carries is discarded.
///
/// The input is matched as a whole; chrono rejects trailing garbage, so
/// `"21 Oct 2025 and more"` does not half-match. The caller is expected to
/// have trimmed whitespace already (the CSV reader does this for us).
pub(crate) fn normalize_date(input: &str) -> Option<NaiveDate> {
    DAY_FIRST
        .iter()
        .chain(YEAR_FIRST)
        .find_map(|shape| shape.parse(input))
}
