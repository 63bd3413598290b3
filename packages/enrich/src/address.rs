//! Street address composition.

use crash_map_crash_models::CrashRecord;

/// Stand-in for a missing address component.
pub const MISSING_COMPONENT: &str = "N/A";

/// Joins street number, direction and name with single spaces.
///
/// Every component is always present in the output; missing ones are
/// replaced with [`MISSING_COMPONENT`].
#[must_use]
pub fn full_address(record: &CrashRecord) -> String {
    [
        record.street_no.as_deref(),
        record.street_direction.as_deref(),
        record.street_name.as_deref(),
    ]
    .map(|part| part.unwrap_or(MISSING_COMPONENT))
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(no: Option<&str>, dir: Option<&str>, name: Option<&str>) -> CrashRecord {
        CrashRecord {
            latitude: 41.9,
            longitude: -87.6,
            crash_type: None,
            crash_date: None,
            most_severe_injury: None,
            injuries_total: None,
            damage: None,
            street_no: no.map(String::from),
            street_direction: dir.map(String::from),
            street_name: name.map(String::from),
            posted_speed_limit: None,
            weather_condition: None,
        }
    }

    #[test]
    fn joins_all_components() {
        let r = record(Some("1200"), Some("N"), Some("STATE ST"));
        assert_eq!(full_address(&r), "1200 N STATE ST");
    }

    #[test]
    fn missing_direction_uses_placeholder() {
        let r = record(Some("55"), None, Some("MADISON ST"));
        assert_eq!(full_address(&r), "55 N/A MADISON ST");
    }

    #[test]
    fn all_missing_still_has_three_parts() {
        let r = record(None, None, None);
        assert_eq!(full_address(&r), "N/A N/A N/A");
    }
}
