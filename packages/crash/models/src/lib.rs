#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash record types, severity tiers and their fixed style tables.
//!
//! This crate defines the record shapes that flow through the crash map
//! pipeline (cleaned rows, enriched rows) along with the closed
//! [`SeverityTier`] and [`TimeOfDay`] enumerations. The per-tier marker style
//! and legend definition text are compile-time constants so every consumer
//! renders tiers identically.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Single-tier crash severity, ordered from most to least severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SeverityTier {
    /// At least one person died.
    #[serde(rename = "Fatal")]
    #[strum(serialize = "Fatal")]
    Fatal,
    /// Incapacitating injury.
    #[serde(rename = "Severe")]
    #[strum(serialize = "Severe")]
    Severe,
    /// Any other reportable injury.
    #[serde(rename = "Injury")]
    #[strum(serialize = "Injury")]
    Injury,
    /// Damage over the reporting threshold with no injuries.
    #[serde(rename = "Property Damage")]
    #[strum(serialize = "Property Damage")]
    PropertyDamage,
    /// Everything else.
    #[serde(rename = "Minor")]
    #[strum(serialize = "Minor")]
    Minor,
}

/// Color and radius used to draw a crash marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerStyle {
    /// CSS hex color.
    pub color: &'static str,
    /// Circle radius in pixels.
    pub radius: u8,
}

impl SeverityTier {
    /// Returns all tiers, most severe first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fatal,
            Self::Severe,
            Self::Injury,
            Self::PropertyDamage,
            Self::Minor,
        ]
    }

    /// Human-readable label, also used as the legend entry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::Severe => "Severe",
            Self::Injury => "Injury",
            Self::PropertyDamage => "Property Damage",
            Self::Minor => "Minor",
        }
    }

    /// Name of the togglable map layer holding this tier's markers.
    #[must_use]
    pub const fn layer_name(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal Accidents",
            Self::Severe => "Severe Accidents",
            Self::Injury => "Injury Accidents",
            Self::PropertyDamage => "Property Damage",
            Self::Minor => "Minor Accidents",
        }
    }

    /// Marker style for this tier.
    #[must_use]
    pub const fn style(self) -> MarkerStyle {
        match self {
            Self::Fatal => MarkerStyle {
                color: "#d62728",
                radius: 8,
            },
            Self::Severe => MarkerStyle {
                color: "#ff7f0e",
                radius: 6,
            },
            Self::Injury => MarkerStyle {
                color: "#1f77b4",
                radius: 5,
            },
            Self::PropertyDamage => MarkerStyle {
                color: "#2ca02c",
                radius: 4,
            },
            Self::Minor => MarkerStyle {
                color: "#7f7f7f",
                radius: 3,
            },
        }
    }

    /// Legend definition shown when the tier's swatch is clicked.
    #[must_use]
    pub const fn definition(self) -> &'static str {
        match self {
            Self::Fatal => {
                "A crash where at least one person died as a result of the accident (MOST_SEVERE_INJURY = \"FATAL\")"
            }
            Self::Severe => {
                "Crashes involving incapacitating injuries that prevent normal activities (MOST_SEVERE_INJURY = \"INCAPACITATING INJURY\")"
            }
            Self::Injury => {
                "Crashes with non-incapacitating but reportable injuries (INJURIES_TOTAL > 0)"
            }
            Self::PropertyDamage => {
                "Crashes with only vehicle/property damage (DAMAGE = \"OVER $1,500\") and no injuries"
            }
            Self::Minor => {
                "All other reportable crashes that don't meet the above criteria (default classification)"
            }
        }
    }
}

/// Coarse time-of-day window derived from the crash hour.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
pub enum TimeOfDay {
    /// `[0, 6)`
    #[strum(serialize = "Night (12am-6am)")]
    Night,
    /// `[6, 12)`
    #[strum(serialize = "Morning (6am-12pm)")]
    Morning,
    /// `[12, 18)`
    #[strum(serialize = "Afternoon (12pm-6pm)")]
    Afternoon,
    /// `[18, 24)`
    #[strum(serialize = "Evening (6pm-12am)")]
    Evening,
    /// No hour available, or an hour outside `0..24`.
    Unknown,
}

impl TimeOfDay {
    /// Buckets an hour of day into its window.
    ///
    /// Windows are left-inclusive. Hours of 24 and above are not valid clock
    /// hours and map to [`TimeOfDay::Unknown`].
    #[must_use]
    pub const fn from_hour(hour: Option<u32>) -> Self {
        match hour {
            Some(0..6) => Self::Night,
            Some(6..12) => Self::Morning,
            Some(12..18) => Self::Afternoon,
            Some(18..24) => Self::Evening,
            Some(_) | None => Self::Unknown,
        }
    }

    /// Display label (e.g. `"Morning (6am-12pm)"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Night => "Night (12am-6am)",
            Self::Morning => "Morning (6am-12pm)",
            Self::Afternoon => "Afternoon (12pm-6pm)",
            Self::Evening => "Evening (6pm-12am)",
            Self::Unknown => "Unknown",
        }
    }
}

/// Inclusive latitude/longitude box used to discard mislocated crashes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Southern edge.
    pub min_latitude: f64,
    /// Northern edge.
    pub max_latitude: f64,
    /// Western edge.
    pub min_longitude: f64,
    /// Eastern edge.
    pub max_longitude: f64,
}

/// Bounding box of the City of Chicago crash dataset.
pub const CHICAGO_BOUNDS: GeoBounds = GeoBounds {
    min_latitude: 41.6,
    max_latitude: 42.1,
    min_longitude: -88.0,
    max_longitude: -87.5,
};

impl GeoBounds {
    /// Returns `true` if the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        CHICAGO_BOUNDS
    }
}

/// A crash row that survived coordinate cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashRecord {
    /// Latitude (WGS84), inside the configured bounds and non-zero.
    pub latitude: f64,
    /// Longitude (WGS84), inside the configured bounds and non-zero.
    pub longitude: f64,
    /// First crash type (e.g. `"PEDESTRIAN"`).
    pub crash_type: Option<String>,
    /// Raw crash date string as it appears in the source.
    pub crash_date: Option<String>,
    /// Most severe injury label (e.g. `"FATAL"`).
    pub most_severe_injury: Option<String>,
    /// Total number of injuries.
    pub injuries_total: Option<f64>,
    /// Damage bracket label (e.g. `"OVER $1,500"`).
    pub damage: Option<String>,
    /// Street number.
    pub street_no: Option<String>,
    /// Street direction (`N`, `S`, `E`, `W`).
    pub street_direction: Option<String>,
    /// Street name.
    pub street_name: Option<String>,
    /// Posted speed limit in mph.
    pub posted_speed_limit: Option<u32>,
    /// Weather condition label.
    pub weather_condition: Option<String>,
}

/// A crash record with its derived display and classification fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCrashRecord {
    /// The cleaned source record.
    pub record: CrashRecord,
    /// Parsed crash date/time. `None` when no known format matched.
    pub crash_datetime: Option<NaiveDateTime>,
    /// Assigned severity tier.
    pub severity: SeverityTier,
    /// Full weekday name (e.g. `"Monday"`).
    pub day_of_week: Option<String>,
    /// Hour of day, `0..24`.
    pub hour: Option<u32>,
    /// Time-of-day window derived from `hour`.
    pub time_of_day: TimeOfDay,
    /// `"<number> <direction> <name>"` with placeholders for missing parts.
    pub full_address: String,
}
