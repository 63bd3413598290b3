//! Crash date parsing.
//!
//! The crash export has used several date layouts over time. Each date is
//! tried against [`CRASH_DATE_FORMATS`] in order and the first successful
//! parse wins.

use chrono::{NaiveDate, NaiveDateTime};

/// A `chrono` format string and whether it carries a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashDateFormat {
    /// Date and time, e.g. `%Y-%m-%d %H:%M:%S`.
    DateTime(&'static str),
    /// Date only; parsed values land at midnight.
    Date(&'static str),
}

/// Accepted crash date layouts, in priority order.
pub const CRASH_DATE_FORMATS: &[CrashDateFormat] = &[
    CrashDateFormat::DateTime("%Y-%m-%d %H:%M:%S"),
    CrashDateFormat::DateTime("%m/%d/%Y %I:%M:%S %p"),
    CrashDateFormat::Date("%Y-%m-%d"),
    CrashDateFormat::DateTime("%m/%d/%Y %H:%M"),
];

impl CrashDateFormat {
    /// Parses `s` with this format only.
    #[must_use]
    pub fn parse(self, s: &str) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(fmt) => NaiveDateTime::parse_from_str(s, fmt).ok(),
            Self::Date(fmt) => NaiveDate::parse_from_str(s, fmt)
                .ok()?
                .and_hms_opt(0, 0, 0),
        }
    }
}

/// Returns the index into [`CRASH_DATE_FORMATS`] of the first format that
/// parses `s`, along with the parsed value. Formats after the match are
/// never tried.
#[must_use]
pub fn first_matching_format(s: &str) -> Option<(usize, NaiveDateTime)> {
    CRASH_DATE_FORMATS
        .iter()
        .enumerate()
        .find_map(|(i, fmt)| fmt.parse(s).map(|dt| (i, dt)))
}

/// Parses a crash date string, or `None` if no known layout matches.
#[must_use]
pub fn parse_crash_date(s: &str) -> Option<NaiveDateTime> {
    first_matching_format(s).map(|(_, dt)| dt)
}

/// Full English weekday name for a datetime.
#[must_use]
pub fn day_name(dt: &NaiveDateTime) -> String {
    dt.format("%A").to_string()
}
