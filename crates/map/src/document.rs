use std::path::PathBuf;

use formats::FeatureCollection;

/// Initial view: central Tunisia, wide enough to frame the whole atlas.
pub const MAP_CENTER_LAT_DEG: f64 = 34.0;
pub const MAP_CENTER_LON_DEG: f64 = 9.0;
pub const MAP_INITIAL_ZOOM: u32 = 7;

pub const SEARCH_PLACEHOLDER: &str = "🔍 Rechercher un المدخل ou الكتابة الصّوتية...";

/// The composed visual artifact: base canvas, optional logo overlay, one
/// searchable marker layer, and the search-highlight behavior. Built once,
/// rendered once, never mutated after writing.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    /// (lat, lon) the canvas opens centered on.
    pub center: (f64, f64),
    pub zoom: u32,
    /// Logo image overlaid on the top-left corner, referenced by file URL.
    pub logo: Option<PathBuf>,
    pub search_placeholder: String,
    pub collection: FeatureCollection,
}

impl MapDocument {
    pub fn new(collection: FeatureCollection) -> Self {
        Self {
            center: (MAP_CENTER_LAT_DEG, MAP_CENTER_LON_DEG),
            zoom: MAP_INITIAL_ZOOM,
            logo: None,
            search_placeholder: SEARCH_PLACEHOLDER.to_string(),
            collection,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Serializes the whole document to one standalone HTML page.
    pub fn render_html(&self) -> Result<String, serde_json::Error> {
        crate::html::render(self)
    }
}
