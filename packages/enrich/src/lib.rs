#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash-type filtering and derived field computation.
//!
//! Takes cleaned [`CrashRecord`]s, keeps one crash category and derives the
//! fields the map displays: parsed datetime, severity tier, weekday, hour,
//! time-of-day window and a composite street address. Every derivation is a
//! pure function of the row.

pub mod address;
pub mod datetime;
pub mod severity;

use chrono::Timelike as _;
use crash_map_crash_models::{CrashRecord, EnrichedCrashRecord, TimeOfDay};

/// Crash type mapped by default.
pub const PEDESTRIAN_CRASH_TYPE: &str = "PEDESTRIAN";

/// Keeps records whose crash type equals `crash_type` exactly.
pub fn filter_crash_type<'a>(
    records: &'a [CrashRecord],
    crash_type: &'a str,
) -> impl Iterator<Item = &'a CrashRecord> + 'a {
    records
        .iter()
        .filter(move |r| r.crash_type.as_deref() == Some(crash_type))
}

/// Derives every display field for a single record.
#[must_use]
pub fn enrich_record(record: &CrashRecord) -> EnrichedCrashRecord {
    let crash_datetime = record
        .crash_date
        .as_deref()
        .and_then(datetime::parse_crash_date);
    let hour = crash_datetime.map(|dt| dt.hour());

    EnrichedCrashRecord {
        record: record.clone(),
        crash_datetime,
        severity: severity::classify(record),
        day_of_week: crash_datetime.as_ref().map(datetime::day_name),
        hour,
        time_of_day: TimeOfDay::from_hour(hour),
        full_address: address::full_address(record),
    }
}

/// Filters `records` to `crash_type` and enriches each match.
#[must_use]
pub fn enrich(records: &[CrashRecord], crash_type: &str) -> Vec<EnrichedCrashRecord> {
    let enriched: Vec<EnrichedCrashRecord> = filter_crash_type(records, crash_type)
        .map(enrich_record)
        .collect();

    log::info!(
        "{} of {} records have crash type {crash_type}",
        enriched.len(),
        records.len()
    );

    let unparsed = enriched
        .iter()
        .filter(|r| r.crash_datetime.is_none())
        .count();
    if unparsed > 0 {
        log::warn!("{unparsed} crash dates did not match any known format");
    }

    enriched
}
