//! Date Range Algebra (§2 component 8): parsing `≤YYYY-MM-DD`, formatting dates back
//! out, and the calendar-aware 30-month offset used to derive the high date from the
//! low date.

use chrono::{Months, NaiveDate};

/// A date that may be ranged: `≤D` means "at or before D; the earlier boundary is
/// unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RangedDate {
    pub date: NaiveDate,
    pub ranged: bool,
}

/// Parse `YYYY-MM-DD` or `≤YYYY-MM-DD`.
pub fn parse_ranged_date(s: &str) -> Result<RangedDate, chrono::ParseError> {
    let (ranged, rest) = match s.strip_prefix('≤') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let date = NaiveDate::parse_from_str(rest, "%Y-%m-%d")?;
    Ok(RangedDate { date, ranged })
}

/// `YYYY-MM-DD`, optionally prefixed `≤`.
#[must_use]
pub fn format_ranged_date(value: RangedDate) -> String {
    if value.ranged {
        format!("≤{}", value.date.format("%Y-%m-%d"))
    } else {
        value.date.format("%Y-%m-%d").to_string()
    }
}

/// Add exactly 30 months, by calendar, clamping the day-of-month the way
/// `chrono::NaiveDate::checked_add_months` does (e.g. 2023-12-31 + 30 months is
/// 2026-06-30, not an overflowed date). Panics only if the resulting year is out of
/// `NaiveDate`'s representable range, which cutoff dates drawn from BCD never hit.
#[must_use]
pub fn add_thirty_months(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(30))
        .expect("30-month offset from a BCD release date stays in range")
}
