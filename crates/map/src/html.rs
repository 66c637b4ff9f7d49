use std::fmt::Write;

use layers::popup::{escape_html, file_url};

use crate::document::MapDocument;

pub const LOGO_WIDTH_PX: u32 = 80;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Carte interactive</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=" crossorigin=""/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=" crossorigin=""></script>
<link rel="stylesheet" href="https://unpkg.com/leaflet-search@3.0.9/dist/leaflet-search.min.css"/>
<script src="https://unpkg.com/leaflet-search@3.0.9/dist/leaflet-search.min.js"></script>
<style>
html, body { height: 100%; margin: 0; }
#map { height: 100%; }
</style>
</head>
<body>
<div id="map"></div>
"#;

const LAYER_SCRIPT: &str = r#"
var entryLayer = L.geoJson(entries, {
    pointToLayer: function (feature, latlng) {
        return L.circleMarker(latlng, { radius: 8, color: 'blue' });
    },
    onEachFeature: function (feature, layer) {
        layer.bindPopup(feature.properties.popup);
        layer.bindTooltip(feature.properties.search_text);
    }
}).addTo(map);
"#;

// One marker highlighted at a time: the previous match goes back to blue
// before the new one turns red.
const HIGHLIGHT_SCRIPT: &str = r#"
var lastMarker = null;
map.on('search:locationfound', function (e) {
    if (lastMarker) { lastMarker.setStyle({color: 'blue'}); }
    e.layer.setStyle({color: 'red'});
    lastMarker = e.layer;
});
</script>
</body>
</html>
"#;

/// Renders the document to one self-contained page: Leaflet canvas, logo
/// overlay, the feature collection as a searchable circle-marker layer, and
/// the search-highlight behavior.
pub fn render(doc: &MapDocument) -> Result<String, serde_json::Error> {
    // A popup can legitimately contain a closing tag; break the sequence so
    // the embedded literal cannot terminate the script element.
    let geojson = doc.collection.to_geojson_string()?.replace("</", "<\\/");
    let placeholder = serde_json::to_string(&doc.search_placeholder)?;

    let mut out = String::new();
    out.push_str(PAGE_HEAD);

    if let Some(logo) = &doc.logo {
        let _ = write!(
            out,
            "<div style=\"position: absolute; top: 5px; left: 5px; z-index: 9999;\">\n\
             <img src=\"{}\" width=\"{LOGO_WIDTH_PX}\">\n\
             </div>\n",
            escape_html(&file_url(logo))
        );
    }

    out.push_str("<script>\nvar entries = ");
    out.push_str(&geojson);
    out.push_str(";\n");

    let (lat, lon) = doc.center;
    let _ = write!(
        out,
        "\nvar map = L.map('map').setView([{lat}, {lon}], {});\n\
         L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{\n\
             maxZoom: 19,\n\
             attribution: '&copy; OpenStreetMap contributors'\n\
         }}).addTo(map);\n",
        doc.zoom
    );

    out.push_str(LAYER_SCRIPT);

    let _ = write!(
        out,
        "\nmap.addControl(new L.Control.Search({{\n\
             layer: entryLayer,\n\
             propertyName: 'search_text',\n\
             textPlaceholder: {placeholder},\n\
             initial: false,\n\
             collapsed: false\n\
         }}));\n"
    );

    out.push_str(HIGHLIGHT_SCRIPT);
    Ok(out)
}
