/// Date handling for timeline entries.
///
/// Jobs and certificates use `MM-YYYY`; conference appearances use `DD-MM-YYYY`.
/// A missing end date is carried as `EndDate::Ongoing` and only resolved to a concrete
/// day (today) when a duration has to be computed.
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

pub const MONTH_YEAR_FORMAT: &str = "MM-YYYY";
pub const EVENT_DATE_FORMAT: &str = "DD-MM-YYYY";

static MONTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{4})$").expect("valid regex"));
static EVENT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed date {value:?}, expected {expected}")]
pub struct MalformedDate {
    pub value: String,
    pub expected: &'static str,
}

impl MalformedDate {
    fn new(value: &str, expected: &'static str) -> Self {
        Self {
            value: value.to_string(),
            expected,
        }
    }
}

/// End of a job or certificate validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    Ongoing,
    Ended(NaiveDate),
}

impl EndDate {
    pub fn is_ongoing(&self) -> bool {
        matches!(self, EndDate::Ongoing)
    }

    /// Concrete day for duration math; ongoing ranges end `today`.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            EndDate::Ongoing => today,
            EndDate::Ended(date) => *date,
        }
    }

    pub fn label(&self) -> String {
        match self {
            EndDate::Ongoing => "Current".to_string(),
            EndDate::Ended(date) => format_month_year(*date),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        match self {
            EndDate::Ongoing => SortKey::Current,
            EndDate::Ended(date) => SortKey::Dated(*date),
        }
    }
}

/// Ordering key for cards. `Current` ranks above every dated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Dated(NaiveDate),
    Current,
}

/// Parse `MM-YYYY` into the first day of that month.
pub fn parse_month_year(text: &str) -> Result<NaiveDate, MalformedDate> {
    let malformed = || MalformedDate::new(text, MONTH_YEAR_FORMAT);
    let caps = MONTH_YEAR_RE.captures(text.trim()).ok_or_else(malformed)?;
    let month: u32 = caps[1].parse().map_err(|_| malformed())?;
    let year: i32 = caps[2].parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(malformed)
}

/// Parse a conference date in `DD-MM-YYYY`.
pub fn parse_event_date(text: &str) -> Result<NaiveDate, MalformedDate> {
    let malformed = || MalformedDate::new(text, EVENT_DATE_FORMAT);
    let caps = EVENT_DATE_RE.captures(text.trim()).ok_or_else(malformed)?;
    let day: u32 = caps[1].parse().map_err(|_| malformed())?;
    let month: u32 = caps[2].parse().map_err(|_| malformed())?;
    let year: i32 = caps[3].parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Parse an optional `MM-YYYY` end date. Absent or blank means ongoing.
pub fn parse_end_date(text: Option<&str>) -> Result<EndDate, MalformedDate> {
    match text.map(str::trim) {
        None | Some("") => Ok(EndDate::Ongoing),
        Some(value) => parse_month_year(value).map(EndDate::Ended),
    }
}

/// Inclusive month count: a range starting and ending in the same month is one month.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b.year() as i64 - a.year() as i64) * 12 + (b.month() as i64 - a.month() as i64) + 1
}

/// "2 years 1 month", "1 year", "5 months"; non-positive counts read "Less than a month".
pub fn format_duration(months: i64) -> String {
    if months <= 0 {
        return "Less than a month".to_string();
    }
    let years = months / 12;
    let rem = months % 12;

    let mut parts = Vec::with_capacity(2);
    if years > 0 {
        parts.push(format!("{years} {}", plural(years, "year")));
    }
    if rem > 0 {
        parts.push(format!("{rem} {}", plural(rem, "month")));
    }
    parts.join(" ")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%m-%Y").to_string()
}

pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
