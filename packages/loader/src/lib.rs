#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash CSV loading and coordinate cleaning.
//!
//! Reads a traffic-crash export (one row per crash, Chicago Data Portal
//! column names), trims header whitespace, and keeps only rows with usable
//! coordinates. Malformed rows never fail the load; they are dropped and
//! counted.

pub mod clean;

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crash_map_crash_models::{CrashRecord, GeoBounds};
use serde::{Deserialize, Deserializer};

pub use clean::{CleanStats, clean};

/// Header of the latitude column.
pub const LATITUDE_COLUMN: &str = "LATITUDE";
/// Header of the longitude column.
pub const LONGITUDE_COLUMN: &str = "LONGITUDE";

/// Errors that can occur while loading a crash file.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV header could not be parsed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the cleaner depends on is absent from the header.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },
}

/// Parses a numeric cell, ignoring surrounding whitespace. Empty or
/// unparseable cells become `None`.
fn trimmed_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let cell: Option<String> = Option::deserialize(deserializer)?;
    Ok(cell.and_then(|s| s.trim().parse().ok()))
}

/// One crash row as it appears in the CSV, before cleaning.
///
/// Numeric cells are trimmed and parsed leniently: cells that fail to parse
/// become `None` instead of rejecting the row. Text cells are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCrashRow {
    #[serde(rename = "LATITUDE", default, deserialize_with = "trimmed_number")]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUDE", default, deserialize_with = "trimmed_number")]
    pub longitude: Option<f64>,
    #[serde(rename = "FIRST_CRASH_TYPE", default)]
    pub crash_type: Option<String>,
    #[serde(rename = "CRASH_DATE", default)]
    pub crash_date: Option<String>,
    #[serde(rename = "MOST_SEVERE_INJURY", default)]
    pub most_severe_injury: Option<String>,
    #[serde(
        rename = "INJURIES_TOTAL",
        default,
        deserialize_with = "trimmed_number"
    )]
    pub injuries_total: Option<f64>,
    #[serde(rename = "DAMAGE", default)]
    pub damage: Option<String>,
    #[serde(rename = "STREET_NO", default)]
    pub street_no: Option<String>,
    #[serde(rename = "STREET_DIRECTION", default)]
    pub street_direction: Option<String>,
    #[serde(rename = "STREET_NAME", default)]
    pub street_name: Option<String>,
    #[serde(
        rename = "POSTED_SPEED_LIMIT",
        default,
        deserialize_with = "trimmed_number"
    )]
    pub posted_speed_limit: Option<u32>,
    #[serde(rename = "WEATHER_CONDITION", default)]
    pub weather_condition: Option<String>,
}

impl RawCrashRow {
    /// Converts into a [`CrashRecord`] with the given (already validated)
    /// coordinates.
    #[must_use]
    pub fn into_record(self, latitude: f64, longitude: f64) -> CrashRecord {
        CrashRecord {
            latitude,
            longitude,
            crash_type: self.crash_type,
            crash_date: self.crash_date,
            most_severe_injury: self.most_severe_injury,
            injuries_total: self.injuries_total,
            damage: self.damage,
            street_no: self.street_no,
            street_direction: self.street_direction,
            street_name: self.street_name,
            posted_speed_limit: self.posted_speed_limit,
            weather_condition: self.weather_condition,
        }
    }
}

/// Parses every row from a CSV stream.
///
/// Header names are trimmed before matching. Rows that cannot be read or
/// deserialized are skipped.
///
/// # Errors
///
/// Returns [`LoaderError`] if the header row cannot be read or lacks the
/// coordinate columns.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawCrashRow>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers: csv::StringRecord = reader.headers()?.iter().map(str::trim).collect();

    for column in [LATITUDE_COLUMN, LONGITUDE_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(LoaderError::MissingColumn { column });
        }
    }

    reader.set_headers(headers.clone());

    let mut rows = Vec::new();
    let mut malformed: u64 = 0;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::trace!("Skipping unreadable row {}: {e}", i + 1);
                malformed += 1;
                continue;
            }
        };

        match record.deserialize::<RawCrashRow>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(e) => {
                log::trace!("Skipping malformed row {}: {e}", i + 1);
                malformed += 1;
            }
        }
    }

    if malformed > 0 {
        log::debug!("Dropped {malformed} malformed rows");
    }
    log::debug!("Parsed {} rows", rows.len());

    Ok(rows)
}

/// Loads a crash CSV and returns only rows with valid coordinates inside
/// `bounds`.
///
/// # Errors
///
/// Returns [`LoaderError`] if the file cannot be opened or its header is
/// unusable.
pub fn load_and_clean(path: &Path, bounds: &GeoBounds) -> Result<Vec<CrashRecord>, LoaderError> {
    log::info!("Loading crash records from {}", path.display());

    let file = std::fs::File::open(path)?;
    let rows = read_rows(std::io::BufReader::new(file))?;
    let (records, stats) = clean(rows, bounds);

    log::info!(
        "Kept {} of {} rows ({} missing coordinates, {} out of bounds, {} zero)",
        stats.retained,
        stats.rows_read,
        stats.missing_coordinates,
        stats.out_of_bounds,
        stats.zero_coordinates,
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use crash_map_crash_models::CHICAGO_BOUNDS;

    use super::*;

    const SAMPLE: &str = " LATITUDE , LONGITUDE ,FIRST_CRASH_TYPE,CRASH_DATE,MOST_SEVERE_INJURY,INJURIES_TOTAL,DAMAGE,STREET_NO,STREET_DIRECTION,STREET_NAME,POSTED_SPEED_LIMIT,WEATHER_CONDITION\n\
        41.9,-87.6,PEDESTRIAN,03/31/2025 11:45:00 PM,FATAL,1,OVER $1500,1200,N,STATE ST,30,CLEAR\n\
        0,0,PEDESTRIAN,,,,,,,,,\n\
        41.7,-87.7,REAR END,2025-03-30,NO INDICATION OF INJURY,0,\"$501 - $1,500\",55,W,MADISON ST,25,RAIN\n\
        ,-87.7,PEDESTRIAN,,,,,,,,,\n";

    #[test]
    fn trims_headers_and_reads_all_rows() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].latitude, Some(41.9));
        assert_eq!(rows[0].crash_type.as_deref(), Some("PEDESTRIAN"));
        assert_eq!(rows[2].damage.as_deref(), Some("$501 - $1,500"));
        assert_eq!(rows[3].latitude, None);
    }

    #[test]
    fn empty_cells_become_none() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows[1].crash_date, None);
        assert_eq!(rows[1].injuries_total, None);
        assert_eq!(rows[1].posted_speed_limit, None);
    }

    #[test]
    fn unparseable_numbers_do_not_drop_row() {
        let csv = "LATITUDE,LONGITUDE,POSTED_SPEED_LIMIT\n41.8,-87.6,fast\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].posted_speed_limit, None);
    }

    #[test]
    fn padded_numeric_cells_are_parsed() {
        let csv = "LATITUDE,LONGITUDE,FIRST_CRASH_TYPE,INJURIES_TOTAL,POSTED_SPEED_LIMIT\n \
            41.9 , -87.6 ,PEDESTRIAN, 2 , 30 \n\
            41.8,-87.6,PEDESTRIAN,,\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].latitude, Some(41.9));
        assert_eq!(rows[0].longitude, Some(-87.6));
        assert_eq!(rows[0].injuries_total, Some(2.0));
        assert_eq!(rows[0].posted_speed_limit, Some(30));

        let (records, stats) = clean(rows, &CHICAGO_BOUNDS);
        assert_eq!(records.len(), 2);
        assert_eq!(stats.missing_coordinates, 0);
    }

    #[test]
    fn text_cells_are_not_trimmed() {
        let csv = "LATITUDE,LONGITUDE,FIRST_CRASH_TYPE\n41.9,-87.6, PEDESTRIAN\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].crash_type.as_deref(), Some(" PEDESTRIAN"));
    }

    #[test]
    fn missing_optional_columns_default_to_none() {
        let csv = "LATITUDE,LONGITUDE\n41.8,-87.6\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].weather_condition, None);
    }

    #[test]
    fn rejects_file_without_coordinate_columns() {
        let csv = "FIRST_CRASH_TYPE,CRASH_DATE\nPEDESTRIAN,2025-01-01\n";
        let err = read_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingColumn {
                column: LATITUDE_COLUMN
            }
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("crash_map_loader_does_not_exist.csv");
        let _ = std::fs::remove_file(&path);
        let err = load_and_clean(&path, &CHICAGO_BOUNDS).unwrap_err();
        assert!(matches!(err, LoaderError::Io(_)));
    }

    #[test]
    fn load_and_clean_keeps_in_bounds_rows() {
        let path = std::env::temp_dir().join("crash_map_loader_sample.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let records = load_and_clean(&path, &CHICAGO_BOUNDS).unwrap();
        assert_eq!(records.len(), 2);
        for r in &records {
            assert!(CHICAGO_BOUNDS.contains(r.latitude, r.longitude));
            assert!(r.latitude != 0.0 && r.longitude != 0.0);
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let path = std::env::temp_dir().join("crash_map_loader_idempotent.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let first = load_and_clean(&path, &CHICAGO_BOUNDS).unwrap();
        let second = load_and_clean(&path, &CHICAGO_BOUNDS).unwrap();
        assert_eq!(first, second);

        let _ = std::fs::remove_file(&path);
    }
}
