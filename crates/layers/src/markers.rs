use std::path::Path;

use formats::{
    CoordinateColumns, DataTable, FeatureCollection, GeoPoint, PointFeature, Row, TableError,
};

use crate::entry::DictEntry;
use crate::popup;
use crate::spread::SpreadRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    MissingCoordinate { column: String },
    BadCoordinate { column: String, value: String },
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::MissingCoordinate { column } => {
                write!(f, "coordinate column {column:?} is empty")
            }
            RowError::BadCoordinate { column, value } => {
                write!(f, "coordinate column {column:?} is not a finite number: {value:?}")
            }
        }
    }
}

impl std::error::Error for RowError {}

/// One dropped input row and why. Indices are zero-based table row numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub index: usize,
    pub error: RowError,
}

/// Everything one collection pass produces: the features in input order,
/// the rows that failed to parse, and which coordinate columns were used.
#[derive(Debug)]
pub struct CollectReport {
    pub collection: FeatureCollection,
    pub skipped: Vec<SkippedRow>,
    pub coordinates: CoordinateColumns,
}

/// Runs every table row through the transform. A row that fails coordinate
/// parsing is recorded and dropped; only a table without coordinate columns
/// aborts the pass.
pub fn collect_features(
    table: &DataTable,
    assets_root: &Path,
) -> Result<CollectReport, TableError> {
    let coordinates = table.resolve_coordinate_columns()?;
    let mut spread = SpreadRegistry::new();
    let mut collection = FeatureCollection::new();
    let mut skipped = Vec::new();

    for (index, row) in table.rows().enumerate() {
        match transform_row(&row, coordinates, &mut spread, assets_root) {
            Ok(feature) => collection.push(feature),
            Err(error) => skipped.push(SkippedRow { index, error }),
        }
    }

    Ok(CollectReport {
        collection,
        skipped,
        coordinates,
    })
}

/// Builds the point feature for one row. The spread registry is keyed on the
/// raw parsed pair, so re-running over the same input reproduces the same
/// placements.
pub fn transform_row(
    row: &Row<'_>,
    coordinates: CoordinateColumns,
    spread: &mut SpreadRegistry,
    assets_root: &Path,
) -> Result<PointFeature, RowError> {
    let lat = parse_coordinate(coordinates.y, row.field(coordinates.y))?;
    let lon = parse_coordinate(coordinates.x, row.field(coordinates.x))?;
    let (lat, lon) = spread.place(lat, lon);

    let entry = DictEntry::from_row(row);
    Ok(PointFeature {
        search_text: entry.search_text(),
        popup_html: popup::render_info_panel(&entry, assets_root),
        point: GeoPoint::new(lon, lat),
    })
}

// The source writes decimals with a comma separator.
fn parse_coordinate(column: &str, raw: &str) -> Result<f64, RowError> {
    if raw.is_empty() {
        return Err(RowError::MissingCoordinate {
            column: column.to_string(),
        });
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::BadCoordinate {
            column: column.to_string(),
            value: raw.to_string(),
        })
}
