//! Writes the interactive pollution map as a self-contained Leaflet page.
//!
//! Only the pieces the map needs are emitted: a tile layer, a marker cluster
//! of circle markers and a heat layer. Libraries load from their CDNs.

use crate::render::error::RenderError;
use crate::types::artifact::{Artifact, ArtifactKind, POLLUTION_MAP};
use crate::types::lat_lon::LatLon;
use crate::types::summary::MapMarker;
use serde::Serialize;

const EXCEEDANCE_COLOUR: &str = "red";
const CLEAN_COLOUR: &str = "green";
const MARKER_RADIUS: u8 = 5;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Pollution map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
<script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
<style>html, body, #map { height: 100%; width: 100%; margin: 0; padding: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{{LAT}}, {{LON}}], {{ZOOM}});
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 18,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);

var markers = {{MARKERS}};
var cluster = L.markerClusterGroup();
markers.forEach(function (m) {
  L.circleMarker([m.lat, m.lon], {
    radius: {{RADIUS}},
    color: m.color,
    fill: true,
    fillColor: m.color
  }).bindPopup(m.popup).addTo(cluster);
});
cluster.addTo(map);

L.heatLayer({{HEAT}}).addTo(map);
</script>
</body>
</html>
"#;

#[derive(Serialize)]
struct MarkerData<'a> {
    lat: f64,
    lon: f64,
    color: &'static str,
    popup: &'a str,
}

/// Serializes `value` for inline use in a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    let json = serde_json::to_string(value)
        .map_err(|e| RenderError::Serialize(POLLUTION_MAP.to_string(), e))?;
    Ok(json.replace("</", "<\\/"))
}

/// Renders the map page centred on `center`.
///
/// Every marker appears both as a clustered circle (red for an exceedance,
/// green otherwise) with its popup, and as a point of the heat layer.
pub fn pollution_map(
    markers: &[MapMarker],
    center: LatLon,
    zoom: u8,
) -> Result<Artifact, RenderError> {
    let marker_data: Vec<MarkerData> = markers
        .iter()
        .map(|m| MarkerData {
            lat: m.position.latitude(),
            lon: m.position.longitude(),
            color: if m.exceedance {
                EXCEEDANCE_COLOUR
            } else {
                CLEAN_COLOUR
            },
            popup: &m.popup,
        })
        .collect();
    let heat: Vec<[f64; 2]> = markers
        .iter()
        .map(|m| [m.position.latitude(), m.position.longitude()])
        .collect();

    let html = TEMPLATE
        .replace("{{LAT}}", &center.latitude().to_string())
        .replace("{{LON}}", &center.longitude().to_string())
        .replace("{{ZOOM}}", &zoom.to_string())
        .replace("{{RADIUS}}", &MARKER_RADIUS.to_string())
        .replace("{{MARKERS}}", &script_json(&marker_data)?)
        .replace("{{HEAT}}", &script_json(&heat)?);

    Ok(Artifact::new(POLLUTION_MAP, ArtifactKind::Html, html.into_bytes()))
}
