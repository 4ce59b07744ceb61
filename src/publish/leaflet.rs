//! Renders a self-contained Leaflet map page.

use std::fmt::Write as _;

use crate::ports::Coordinates;

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// A point on the map with its popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Where the marker goes.
    pub position: Coordinates,
    /// Plain-text popup; newlines become line breaks.
    pub label: String,
}

/// A map ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafletMap {
    /// Initial view center.
    pub center: Coordinates,
    /// Initial zoom level.
    pub zoom: u8,
    /// Markers in placement order.
    pub markers: Vec<Marker>,
}

impl LeafletMap {
    /// An empty map centered on `center`.
    #[must_use]
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self { center, zoom, markers: Vec::new() }
    }

    /// Adds a marker.
    pub fn add_marker(&mut self, position: Coordinates, label: impl Into<String>) {
        self.markers.push(Marker { position, label: label.into() });
    }

    /// Renders the full HTML page.
    ///
    /// `map_id` becomes the id of the map container and the name of the
    /// script variable, so it must be a valid JavaScript identifier.
    #[must_use]
    pub fn render(&self, map_id: &str) -> String {
        let mut html = String::with_capacity(1024 + self.markers.len() * 160);
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html>
<head>
<meta http-equiv="content-type" content="text/html; charset=UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<link rel="stylesheet" href="{LEAFLET_CSS}"/>
<script src="{LEAFLET_JS}"></script>
<style>html, body {{width: 100%; height: 100%; margin: 0; padding: 0;}} #{map_id} {{width: 100%; height: 100%;}}</style>
</head>
<body>
<div class="folium-map" id="{map_id}"></div>
<script>
var {map_id} = L.map("{map_id}").setView([{lat}, {lon}], {zoom});
L.tileLayer({tiles}, {{maxZoom: 19, attribution: {attribution}}}).addTo({map_id});
"#,
            lat = self.center.lat,
            lon = self.center.lon,
            zoom = self.zoom,
            tiles = js_string(TILE_URL),
            attribution = js_string(ATTRIBUTION),
        );
        for marker in &self.markers {
            let _ = writeln!(
                html,
                "L.marker([{}, {}]).bindPopup({}).addTo({map_id});",
                marker.position.lat,
                marker.position.lon,
                js_string(&popup_html(&marker.label)),
            );
        }
        html.push_str("</script>\n</body>\n</html>\n");
        html
    }
}

/// Escapes `text` for HTML and turns newlines into `<br>`.
fn popup_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            c => out.push(c),
        }
    }
    out
}

/// A JavaScript string literal that is also safe inside `<script>`.
fn js_string(text: &str) -> String {
    serde_json::Value::from(text).to_string().replace("</", "<\\/")
}
