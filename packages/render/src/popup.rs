//! Popup and tooltip text for a crash marker.

use crash_map_crash_models::EnrichedCrashRecord;

use crate::html::escape;

/// Shown when a display field is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown when the day or time of day cannot be derived.
pub const UNKNOWN: &str = "Unknown";

/// Builds the popup body for a crash.
#[must_use]
pub fn popup_html(crash: &EnrichedCrashRecord) -> String {
    let record = &crash.record;

    let date = crash
        .crash_datetime
        .map_or_else(|| NOT_AVAILABLE.to_string(), |dt| dt.format("%Y-%m-%d").to_string());
    let day = crash.day_of_week.as_deref().unwrap_or(UNKNOWN);
    let injuries = record
        .injuries_total
        .map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string());
    let speed_limit = record
        .posted_speed_limit
        .map_or_else(|| NOT_AVAILABLE.to_string(), |mph| format!("{mph} mph"));
    let weather = record.weather_condition.as_deref().unwrap_or(NOT_AVAILABLE);

    format!(
        "<b>Severity:</b> {severity}<br>\
         <b>Date:</b> {date}<br>\
         <b>Time:</b> {time} ({day})<br>\
         <b>Injuries:</b> {injuries}<br>\
         <b>Speed Limit:</b> {speed_limit}<br>\
         <b>Weather:</b> {weather}<br>\
         <b>Address:</b> {address}",
        severity = crash.severity.label(),
        time = crash.time_of_day.label(),
        day = escape(day),
        weather = escape(weather),
        address = escape(&crash.full_address),
    )
}

/// Short hover text for a crash marker.
#[must_use]
pub fn tooltip(crash: &EnrichedCrashRecord) -> String {
    format!(
        "{} accident at {}",
        crash.severity.label(),
        crash.time_of_day.label()
    )
}
