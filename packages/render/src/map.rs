//! The map canvas: an in-memory model of a Leaflet page.
//!
//! [`MapCanvas`] collects tile layers, marker clusters, controls and raw HTML
//! overlays, then serializes everything into one HTML document with
//! [`MapCanvas::to_html`].

use std::path::Path;

use crash_map_crash_models::SeverityTier;
use serde::{Deserialize, Serialize};

use crate::RenderError;
use crate::controls::MapControl;
use crate::html::{escape, script_json};
use crate::layers::TileLayer;
use crate::marker::MarkerCluster;

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js";
const MARKERCLUSTER_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet.markercluster/1.5.3/MarkerCluster.css";
const MARKERCLUSTER_DEFAULT_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet.markercluster/1.5.3/MarkerCluster.Default.css";
const MARKERCLUSTER_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet.markercluster/1.5.3/leaflet.markercluster.js";
const MINIMAP_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet-minimap/3.6.1/Control.MiniMap.css";
const MINIMAP_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet-minimap/3.6.1/Control.MiniMap.js";
const FULLSCREEN_CSS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet.fullscreen@3.0.0/Control.FullScreen.css";
const FULLSCREEN_JS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet.fullscreen@3.0.0/Control.FullScreen.min.js";

const STYLESHEETS: &[&str] = &[
    LEAFLET_CSS,
    MARKERCLUSTER_CSS,
    MARKERCLUSTER_DEFAULT_CSS,
    MINIMAP_CSS,
    FULLSCREEN_CSS,
];
const SCRIPTS: &[&str] = &[LEAFLET_JS, MARKERCLUSTER_JS, MINIMAP_JS, FULLSCREEN_JS];

/// Element id of the map container and name of the map JS variable.
const MAP_ID: &str = "crash_map";
const BASE_LAYERS_VAR: &str = "base_layers";
const OVERLAYS_VAR: &str = "overlay_layers";

/// Page-level map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// HTML page title.
    pub title: String,
    /// Initial view center latitude.
    pub center_latitude: f64,
    /// Initial view center longitude.
    pub center_longitude: f64,
    /// Initial zoom level.
    pub zoom: u8,
    /// Whether to show a scale bar.
    pub control_scale: bool,
    /// Popup width cap in pixels.
    pub popup_max_width: u32,
    /// Marker fill opacity, `0.0..=1.0`.
    pub fill_opacity: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            title: "Chicago Pedestrian Crashes".to_string(),
            center_latitude: 41.8781,
            center_longitude: -87.6298,
            zoom: 11,
            control_scale: true,
            popup_max_width: 300,
            fill_opacity: 0.7,
        }
    }
}

/// In-memory model of an interactive map page.
#[derive(Debug, Clone)]
pub struct MapCanvas {
    options: MapOptions,
    tile_layers: Vec<TileLayer>,
    clusters: Vec<MarkerCluster>,
    controls: Vec<MapControl>,
    html_elements: Vec<String>,
}

impl MapCanvas {
    /// Creates an empty canvas.
    #[must_use]
    pub const fn new(options: MapOptions) -> Self {
        Self {
            options,
            tile_layers: Vec::new(),
            clusters: Vec::new(),
            controls: Vec::new(),
            html_elements: Vec::new(),
        }
    }

    /// Registers a base layer. The first one added is shown initially.
    pub fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tile_layers.push(layer);
    }

    #[must_use]
    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    /// Registers a marker cluster group as a togglable overlay.
    pub fn add_cluster(&mut self, cluster: MarkerCluster) {
        self.clusters.push(cluster);
    }

    #[must_use]
    pub fn clusters(&self) -> &[MarkerCluster] {
        &self.clusters
    }

    /// Returns the cluster group for `tier`, if one was added.
    #[must_use]
    pub fn cluster(&self, tier: SeverityTier) -> Option<&MarkerCluster> {
        self.clusters.iter().find(|c| c.tier() == tier)
    }

    /// Mutable access to the cluster group for `tier`.
    pub fn cluster_mut(&mut self, tier: SeverityTier) -> Option<&mut MarkerCluster> {
        self.clusters.iter_mut().find(|c| c.tier() == tier)
    }

    /// Adds a control. Controls are rendered after all layers.
    pub fn add_control(&mut self, control: MapControl) {
        self.controls.push(control);
    }

    #[must_use]
    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    /// Appends raw HTML to the page body, after the map container.
    pub fn add_html_element(&mut self, html: String) {
        self.html_elements.push(html);
    }

    /// Total number of markers across all cluster groups.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.clusters.iter().map(|c| c.markers().len()).sum()
    }

    /// Serializes the canvas into a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if marker data cannot be serialized.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\" />\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no\" />\n",
        );
        html.push_str(&format!("<title>{}</title>\n", escape(&self.options.title)));
        for href in STYLESHEETS {
            html.push_str(&format!("<link rel=\"stylesheet\" href=\"{href}\" />\n"));
        }
        for src in SCRIPTS {
            html.push_str(&format!("<script src=\"{src}\"></script>\n"));
        }
        html.push_str(&format!(
            "<style>\n\
             html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}\n\
             #{MAP_ID} {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}\n\
             </style>\n"
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<div id=\"{MAP_ID}\"></div>\n"));

        for element in &self.html_elements {
            html.push_str(element);
            if !element.ends_with('\n') {
                html.push('\n');
            }
        }

        html.push_str("<script>\n");
        html.push_str(&self.script()?);
        html.push_str("</script>\n</body>\n</html>\n");

        Ok(html)
    }

    fn script(&self) -> Result<String, RenderError> {
        let opts = &self.options;
        let mut js = String::new();

        js.push_str(&format!(
            "var {MAP_ID} = L.map(\"{MAP_ID}\", {{\"center\": [{}, {}], \"zoom\": {}, \"zoomControl\": true}});\n",
            opts.center_latitude, opts.center_longitude, opts.zoom
        ));
        if opts.control_scale {
            js.push_str(&format!("L.control.scale().addTo({MAP_ID});\n"));
        }
        js.push_str(&format!("var {BASE_LAYERS_VAR} = {{}};\nvar {OVERLAYS_VAR} = {{}};\n"));

        for (i, layer) in self.tile_layers.iter().enumerate() {
            let var = format!("tile_layer_{i}");
            js.push_str(&format!(
                "var {var} = L.tileLayer({}, {});\n",
                script_json(layer.url)?,
                script_json(&layer.leaflet_options())?
            ));
            if i == 0 {
                js.push_str(&format!("{var}.addTo({MAP_ID});\n"));
            }
            js.push_str(&format!(
                "{BASE_LAYERS_VAR}[{}] = {var};\n",
                script_json(layer.name)?
            ));
        }

        js.push_str(&format!(
            "function addCrashMarkers(group, markers) {{\n  \
             markers.forEach(function (m) {{\n    \
             L.circleMarker([m.latitude, m.longitude], {{\"radius\": m.radius, \"color\": m.color, \"fill\": true, \"fillColor\": m.color, \"fillOpacity\": {}}})\n      \
             .bindPopup(m.popup, {{\"maxWidth\": {}}})\n      \
             .bindTooltip(m.tooltip)\n      \
             .addTo(group);\n  \
             }});\n\
             }}\n",
            opts.fill_opacity, opts.popup_max_width
        ));

        for (i, cluster) in self.clusters.iter().enumerate() {
            let var = format!("cluster_{i}");
            js.push_str(&format!(
                "var {var} = L.markerClusterGroup().addTo({MAP_ID});\n\
                 {OVERLAYS_VAR}[{}] = {var};\n\
                 addCrashMarkers({var}, {});\n",
                script_json(cluster.name())?,
                script_json(cluster.markers())?
            ));
        }

        for control in &self.controls {
            js.push_str(&control.script(MAP_ID, BASE_LAYERS_VAR, OVERLAYS_VAR));
        }

        Ok(js)
    }

    /// Writes the HTML document to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, html)?;
        log::debug!("Wrote map to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlPosition;
    use crate::layers::{BASEMAPS, CARTODB_POSITRON};

    #[test]
    fn empty_canvas_renders_valid_shell() {
        let canvas = MapCanvas::new(MapOptions::default());
        let html = canvas.to_html().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div id=\"crash_map\"></div>"));
        assert!(html.contains("\"center\": [41.8781, -87.6298], \"zoom\": 11"));
        assert!(html.contains("L.control.scale()"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn only_first_tile_layer_is_added_initially() {
        let mut canvas = MapCanvas::new(MapOptions::default());
        for layer in BASEMAPS {
            canvas.add_tile_layer(*layer);
        }
        let html = canvas.to_html().unwrap();
        assert!(html.contains("tile_layer_0.addTo(crash_map);"));
        assert!(!html.contains("tile_layer_1.addTo(crash_map);"));
        assert!(html.contains("base_layers[\"Stamen Toner\"] = tile_layer_1;"));
    }

    #[test]
    fn clusters_register_as_overlays() {
        let mut canvas = MapCanvas::new(MapOptions::default());
        canvas.add_cluster(MarkerCluster::new(SeverityTier::Fatal));
        let html = canvas.to_html().unwrap();
        assert!(html.contains("overlay_layers[\"Fatal Accidents\"] = cluster_0;"));
        assert!(html.contains("addCrashMarkers(cluster_0, []);"));
    }

    #[test]
    fn controls_follow_layers() {
        let mut canvas = MapCanvas::new(MapOptions::default());
        canvas.add_tile_layer(CARTODB_POSITRON);
        canvas.add_control(MapControl::Fullscreen {
            position: ControlPosition::TopLeft,
        });
        let html = canvas.to_html().unwrap();
        let layer_at = html.find("tile_layer_0 =").unwrap();
        let control_at = html.find("L.control.fullscreen").unwrap();
        assert!(layer_at < control_at);
    }

    #[test]
    fn scale_bar_can_be_disabled() {
        let canvas = MapCanvas::new(MapOptions {
            control_scale: false,
            ..MapOptions::default()
        });
        assert!(!canvas.to_html().unwrap().contains("L.control.scale()"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = std::env::temp_dir().join("crash_map_render_save_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("map.html");

        MapCanvas::new(MapOptions::default()).save(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
