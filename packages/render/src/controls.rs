//! Map controls: layer switcher, mini-map and fullscreen toggle.

use strum_macros::{AsRefStr, Display};

use crate::layers::TileLayer;

/// Corner of the map a control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A Leaflet control added to the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapControl {
    /// Base layer and overlay switcher.
    Layers {
        /// Whether the control starts collapsed to an icon.
        collapsed: bool,
        position: ControlPosition,
    },
    /// Small overview map following the main view.
    MiniMap {
        tile_layer: TileLayer,
        position: ControlPosition,
    },
    /// Fullscreen toggle button.
    Fullscreen { position: ControlPosition },
}

impl MapControl {
    /// JavaScript that creates the control and adds it to `map_var`.
    ///
    /// `base_var` and `overlay_var` name the objects holding the base layers
    /// and overlays registered so far.
    #[must_use]
    pub fn script(&self, map_var: &str, base_var: &str, overlay_var: &str) -> String {
        match self {
            Self::Layers {
                collapsed,
                position,
            } => format!(
                "L.control.layers({base_var}, {overlay_var}, {{\"collapsed\": {collapsed}, \"position\": \"{position}\"}}).addTo({map_var});\n"
            ),
            Self::MiniMap {
                tile_layer,
                position,
            } => format!(
                "new L.Control.MiniMap(L.tileLayer(\"{url}\", {options}), {{\"position\": \"{position}\", \"toggleDisplay\": true}}).addTo({map_var});\n",
                url = tile_layer.url,
                options = tile_layer.leaflet_options(),
            ),
            Self::Fullscreen { position } => format!(
                "L.control.fullscreen({{\"position\": \"{position}\"}}).addTo({map_var});\n"
            ),
        }
    }
}
