// Field normalization for event dates and times
//
// Both functions are total: they never fail. A date that cannot be parsed is
// stored as the client sent it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-only formats accepted by [`normalize_date`], tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-time formats without an offset, taken as the calendar date written.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Date-times carrying an offset (RFC 3339, RFC 2822) are converted to their
/// UTC calendar date. Inputs that do not parse are returned unchanged.
pub fn normalize_date(date: &str) -> String {
    match parse_calendar_date(date.trim()) {
        Some(parsed) => parsed.format("%Y-%m-%d").to_string(),
        None => date.to_string(),
    }
}

fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| parse_partial_iso(input))
}

/// `YYYY-MM` or `YYYY`; the missing month and day default to the first.
fn parse_partial_iso(input: &str) -> Option<NaiveDate> {
    let (year, month) = input.split_once('-').unwrap_or((input, "01"));
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Normalize a time string: trim and collapse internal whitespace runs to a
/// single space. No attempt is made to interpret the value.
pub fn normalize_time(time: &str) -> String {
    time.split_whitespace().collect::<Vec<_>>().join(" ")
}
