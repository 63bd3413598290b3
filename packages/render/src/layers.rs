//! Basemap tile layers.

/// A raster tile source selectable as a map background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayer {
    /// Name shown in the layer control.
    pub name: &'static str,
    /// `{z}/{x}/{y}` URL template.
    pub url: &'static str,
    /// Attribution HTML shown in the map corner.
    pub attribution: &'static str,
    /// Tile server subdomains substituted for `{s}`.
    pub subdomains: &'static str,
    /// Highest zoom level the server provides.
    pub max_zoom: u8,
}

/// Light, low-contrast basemap used by default and in the mini-map.
pub const CARTODB_POSITRON: TileLayer = TileLayer {
    name: "CartoDB positron",
    url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
    subdomains: "abcd",
    max_zoom: 20,
};

/// High-contrast black and white basemap.
pub const STAMEN_TONER: TileLayer = TileLayer {
    name: "Stamen Toner",
    url: "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}{r}.png",
    attribution: "Map tiles by <a href=\"https://stamen.com\">Stamen Design</a>, under <a href=\"https://creativecommons.org/licenses/by/3.0\">CC BY 3.0</a>. Data by <a href=\"https://openstreetmap.org\">OpenStreetMap</a>, under <a href=\"https://www.openstreetmap.org/copyright\">ODbL</a>.",
    subdomains: "abc",
    max_zoom: 20,
};

/// Dark basemap.
pub const CARTODB_DARK_MATTER: TileLayer = TileLayer {
    name: "CartoDB dark_matter",
    url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
    subdomains: "abcd",
    max_zoom: 20,
};

/// Default basemap followed by the alternates, in layer-control order.
pub const BASEMAPS: &[TileLayer] = &[CARTODB_POSITRON, STAMEN_TONER, CARTODB_DARK_MATTER];

impl TileLayer {
    /// Leaflet `tileLayer` options object for this layer.
    #[must_use]
    pub fn leaflet_options(&self) -> serde_json::Value {
        serde_json::json!({
            "attribution": self.attribution,
            "subdomains": self.subdomains,
            "maxZoom": self.max_zoom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_basemap_has_attribution() {
        assert_eq!(BASEMAPS.len(), 3);
        for layer in BASEMAPS {
            assert!(!layer.attribution.is_empty(), "{} lacks attribution", layer.name);
        }
    }

    #[test]
    fn alternates_have_distinct_attribution() {
        assert_ne!(STAMEN_TONER.attribution, CARTODB_POSITRON.attribution);
        assert!(STAMEN_TONER.attribution.contains("Stamen Design"));
    }

    #[test]
    fn options_use_leaflet_keys() {
        let opts = CARTODB_POSITRON.leaflet_options();
        assert_eq!(opts["maxZoom"], 20);
        assert_eq!(opts["subdomains"], "abcd");
    }
}
