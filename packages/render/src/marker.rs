//! Circle markers and per-tier cluster groups.

use crash_map_crash_models::{EnrichedCrashRecord, SeverityTier};
use serde::Serialize;

use crate::popup::{popup_html, tooltip};

/// A filled circle marker with a popup and hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u8,
    pub color: &'static str,
    pub popup: String,
    pub tooltip: String,
}

impl CircleMarker {
    /// Builds the marker for a crash, styled by its severity tier.
    #[must_use]
    pub fn for_crash(crash: &EnrichedCrashRecord) -> Self {
        let style = crash.severity.style();
        Self {
            latitude: crash.record.latitude,
            longitude: crash.record.longitude,
            radius: style.radius,
            color: style.color,
            popup: popup_html(crash),
            tooltip: tooltip(crash),
        }
    }
}

/// A togglable marker cluster group holding one severity tier.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCluster {
    tier: SeverityTier,
    markers: Vec<CircleMarker>,
}

impl MarkerCluster {
    /// Creates an empty cluster group for `tier`.
    #[must_use]
    pub const fn new(tier: SeverityTier) -> Self {
        Self {
            tier,
            markers: Vec::new(),
        }
    }

    /// Tier whose markers this group holds.
    #[must_use]
    pub const fn tier(&self) -> SeverityTier {
        self.tier
    }

    /// Name shown in the layer control.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.tier.layer_name()
    }

    /// Markers in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    /// Adds a marker to the group.
    pub fn add(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }
}
