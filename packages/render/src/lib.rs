#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Leaflet map rendering for enriched crash records.
//!
//! [`build_crash_map`] turns enriched records into a [`MapCanvas`] with one
//! marker cluster group per [`SeverityTier`], three basemaps, a layer switcher,
//! a mini-map, a fullscreen toggle and a clickable severity legend.
//! [`render_crash_map`] additionally writes the canvas to a standalone HTML
//! file.

pub mod controls;
pub mod html;
pub mod layers;
pub mod legend;
pub mod map;
pub mod marker;
pub mod popup;
pub mod progress;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crash_map_crash_models::{EnrichedCrashRecord, SeverityTier};

pub use map::{MapCanvas, MapOptions};

use crate::controls::{ControlPosition, MapControl};
use crate::layers::{BASEMAPS, CARTODB_POSITRON};
use crate::marker::{CircleMarker, MarkerCluster};
use crate::progress::ProgressCallback;

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "chicago_pedestrian_crashes.html";

/// Errors that can occur while rendering or saving a map.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing embedded map data failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of markers placed on the map.
    pub markers: usize,
    /// Marker count per tier, most severe first.
    pub tier_counts: Vec<(SeverityTier, usize)>,
    /// Where the HTML file was written.
    pub output: PathBuf,
}

/// Builds the full crash map for `records`.
#[must_use]
pub fn build_crash_map(
    records: &[EnrichedCrashRecord],
    options: &MapOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> MapCanvas {
    let mut canvas = MapCanvas::new(options.clone());

    for layer in BASEMAPS {
        canvas.add_tile_layer(*layer);
    }

    for tier in SeverityTier::all() {
        canvas.add_cluster(MarkerCluster::new(*tier));
    }

    progress.set_total(records.len() as u64);
    for crash in records {
        if let Some(cluster) = canvas.cluster_mut(crash.severity) {
            cluster.add(CircleMarker::for_crash(crash));
        }
        progress.inc(1);
    }
    progress.finish(format!("Placed {} markers", records.len()));

    canvas.add_control(MapControl::Layers {
        collapsed: false,
        position: ControlPosition::TopRight,
    });
    canvas.add_control(MapControl::MiniMap {
        tile_layer: CARTODB_POSITRON,
        position: ControlPosition::BottomRight,
    });
    canvas.add_control(MapControl::Fullscreen {
        position: ControlPosition::TopLeft,
    });

    canvas.add_html_element(legend::legend_html());

    canvas
}

/// Builds the crash map and writes it to `output`.
///
/// # Errors
///
/// Returns [`RenderError`] if the map cannot be serialized or written.
pub fn render_crash_map(
    records: &[EnrichedCrashRecord],
    output: &Path,
    options: &MapOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<RenderSummary, RenderError> {
    let canvas = build_crash_map(records, options, progress);

    let tier_counts: Vec<(SeverityTier, usize)> = canvas
        .clusters()
        .iter()
        .map(|c| (c.tier(), c.markers().len()))
        .collect();
    for (tier, count) in &tier_counts {
        log::debug!("{tier}: {count} markers");
    }

    canvas.save(output)?;

    let summary = RenderSummary {
        markers: canvas.marker_count(),
        tier_counts,
        output: output.to_path_buf(),
    };
    log::info!(
        "Rendered {} markers to {}",
        summary.markers,
        summary.output.display()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use crash_map_crash_models::CrashRecord;
    use crash_map_enrich::enrich_record;

    use super::*;
    use crate::progress::null_progress;

    fn crash(injury: Option<&str>, injuries: Option<f64>) -> EnrichedCrashRecord {
        enrich_record(&CrashRecord {
            latitude: 41.9,
            longitude: -87.6,
            crash_type: Some("PEDESTRIAN".to_string()),
            crash_date: Some("03/31/2025 11:45:00 PM".to_string()),
            most_severe_injury: injury.map(String::from),
            injuries_total: injuries,
            damage: None,
            street_no: Some("1200".to_string()),
            street_direction: Some("N".to_string()),
            street_name: Some("STATE ST".to_string()),
            posted_speed_limit: Some(30),
            weather_condition: Some("CLEAR".to_string()),
        })
    }

    #[test]
    fn builds_five_clusters_in_tier_order() {
        let canvas = build_crash_map(&[], &MapOptions::default(), &null_progress());
        let tiers: Vec<SeverityTier> = canvas.clusters().iter().map(MarkerCluster::tier).collect();
        assert_eq!(tiers, SeverityTier::all());
    }

    #[test]
    fn registers_default_and_alternate_basemaps() {
        let canvas = build_crash_map(&[], &MapOptions::default(), &null_progress());
        assert_eq!(canvas.tile_layers().len(), 3);
        assert_eq!(canvas.tile_layers()[0], CARTODB_POSITRON);
    }

    #[test]
    fn adds_layer_minimap_and_fullscreen_controls() {
        let canvas = build_crash_map(&[], &MapOptions::default(), &null_progress());
        let controls = canvas.controls();
        assert_eq!(controls.len(), 3);
        assert!(matches!(controls[0], MapControl::Layers { collapsed: false, .. }));
        assert!(matches!(controls[1], MapControl::MiniMap { .. }));
        assert!(matches!(controls[2], MapControl::Fullscreen { .. }));
    }

    #[test]
    fn markers_land_in_their_tier_cluster() {
        let records = vec![
            crash(Some("FATAL"), Some(1.0)),
            crash(Some("NONINCAPACITATING INJURY"), Some(1.0)),
            crash(None, None),
        ];
        let canvas = build_crash_map(&records, &MapOptions::default(), &null_progress());

        assert_eq!(canvas.marker_count(), 3);
        let fatal = canvas.cluster(SeverityTier::Fatal).unwrap();
        assert_eq!(fatal.markers().len(), 1);
        assert_eq!(fatal.markers()[0].color, "#d62728");
        assert_eq!(fatal.markers()[0].radius, 8);
        assert_eq!(canvas.cluster(SeverityTier::Injury).unwrap().markers().len(), 1);
        assert_eq!(canvas.cluster(SeverityTier::Minor).unwrap().markers().len(), 1);
        assert!(canvas.cluster(SeverityTier::Severe).unwrap().markers().is_empty());
    }

    #[test]
    fn render_writes_legend_and_definitions() {
        let path = std::env::temp_dir().join("crash_map_render_lib_test.html");
        let _ = std::fs::remove_file(&path);

        let summary = render_crash_map(
            &[crash(Some("FATAL"), Some(1.0))],
            &path,
            &MapOptions::default(),
            &null_progress(),
        )
        .unwrap();

        assert_eq!(summary.markers, 1);
        assert_eq!(summary.tier_counts[0], (SeverityTier::Fatal, 1));

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(!html.is_empty());
        for tier in SeverityTier::all() {
            assert!(html.contains(&format!("<span>{}</span>", tier.label())));
            assert!(html.contains(tier.definition()));
        }
        assert!(html.contains("Fatal accident at Evening (6pm-12am)"));

        let _ = std::fs::remove_file(&path);
    }
}
