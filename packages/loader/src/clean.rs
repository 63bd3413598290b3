//! Coordinate cleaning.
//!
//! Rows are filtered in three passes, in order: missing coordinates, outside
//! the bounding box, then zero coordinates. The zero pass only drops rows
//! when the configured bounds contain the equator or the prime meridian.

use crash_map_crash_models::{CrashRecord, GeoBounds};

use crate::RawCrashRow;

/// Counts of rows kept and dropped by [`clean`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Rows handed to the cleaner.
    pub rows_read: usize,
    /// Rows missing latitude or longitude.
    pub missing_coordinates: usize,
    /// Rows outside the bounding box.
    pub out_of_bounds: usize,
    /// Rows with a zero latitude or longitude.
    pub zero_coordinates: usize,
    /// Rows that survived every pass.
    pub retained: usize,
}

/// Drops rows without usable coordinates.
#[must_use]
pub fn clean(rows: Vec<RawCrashRow>, bounds: &GeoBounds) -> (Vec<CrashRecord>, CleanStats) {
    let mut stats = CleanStats {
        rows_read: rows.len(),
        ..CleanStats::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let (Some(latitude), Some(longitude)) = (row.latitude, row.longitude) else {
            stats.missing_coordinates += 1;
            continue;
        };

        if !bounds.contains(latitude, longitude) {
            stats.out_of_bounds += 1;
            continue;
        }

        if latitude == 0.0 || longitude == 0.0 {
            stats.zero_coordinates += 1;
            continue;
        }

        records.push(row.into_record(latitude, longitude));
    }

    stats.retained = records.len();
    (records, stats)
}

#[cfg(test)]
mod tests {
    use crash_map_crash_models::CHICAGO_BOUNDS;

    use super::*;

    fn row(latitude: Option<f64>, longitude: Option<f64>) -> RawCrashRow {
        RawCrashRow {
            latitude,
            longitude,
            ..RawCrashRow::default()
        }
    }

    #[test]
    fn drops_missing_coordinates() {
        let (records, stats) = clean(
            vec![row(None, Some(-87.6)), row(Some(41.9), None)],
            &CHICAGO_BOUNDS,
        );
        assert!(records.is_empty());
        assert_eq!(stats.missing_coordinates, 2);
    }

    #[test]
    fn keeps_edges_of_bounds() {
        let (records, stats) = clean(
            vec![row(Some(41.6), Some(-88.0)), row(Some(42.1), Some(-87.5))],
            &CHICAGO_BOUNDS,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(stats.retained, 2);
    }

    #[test]
    fn drops_out_of_bounds_and_nan() {
        let (records, stats) = clean(
            vec![
                row(Some(40.0), Some(-87.6)),
                row(Some(41.9), Some(-86.0)),
                row(Some(f64::NAN), Some(-87.6)),
            ],
            &CHICAGO_BOUNDS,
        );
        assert!(records.is_empty());
        assert_eq!(stats.out_of_bounds, 3);
    }

    #[test]
    fn zero_is_caught_by_bounds_first() {
        let (records, stats) = clean(vec![row(Some(0.0), Some(0.0))], &CHICAGO_BOUNDS);
        assert!(records.is_empty());
        assert_eq!(stats.out_of_bounds, 1);
        assert_eq!(stats.zero_coordinates, 0);
    }

    #[test]
    fn zero_pass_applies_when_bounds_include_zero() {
        let bounds = GeoBounds {
            min_latitude: -1.0,
            max_latitude: 1.0,
            min_longitude: -1.0,
            max_longitude: 1.0,
        };
        let (records, stats) = clean(
            vec![row(Some(0.0), Some(0.5)), row(Some(0.5), Some(0.5))],
            &bounds,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(stats.zero_coordinates, 1);
    }

    #[test]
    fn every_retained_row_satisfies_invariant() {
        let rows = vec![
            row(Some(41.9), Some(-87.6)),
            row(Some(0.0), Some(0.0)),
            row(Some(41.7), Some(-87.7)),
            row(None, None),
            row(Some(42.5), Some(-87.7)),
        ];
        let (records, stats) = clean(rows, &CHICAGO_BOUNDS);
        assert_eq!(records.len(), 2);
        assert_eq!(stats.rows_read, 5);
        for r in &records {
            assert!((41.6..=42.1).contains(&r.latitude));
            assert!((-88.0..=-87.5).contains(&r.longitude));
            assert!(r.latitude != 0.0 && r.longitude != 0.0);
        }
    }
}
