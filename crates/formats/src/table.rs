use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

pub const TABLE_DELIMITER: u8 = b';';

#[derive(Debug)]
pub enum TableError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        source: csv::Error,
    },
    MissingCoordinateColumns,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io { path, source } => {
                write!(f, "failed to read table {}: {source}", path.display())
            }
            TableError::Malformed { source } => write!(f, "malformed table: {source}"),
            TableError::MissingCoordinateColumns => {
                write!(f, "header has no x/X and y/Y coordinate column pair")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Which header variants carry the coordinates for every row of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateColumns {
    pub x: &'static str,
    pub y: &'static str,
}

/// A semicolon-delimited table with trimmed headers and scrubbed coordinate
/// text, loaded whole. Rows are accessed by column name with an empty-string
/// fallback, so optional columns never fail a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl DataTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Spreadsheet exports routinely lead with a BOM; decoding strips it
        // and substitutes invalid sequences instead of failing the load.
        let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
        Self::from_delimited_str(&text)
    }

    pub fn from_delimited_str(content: &str) -> Result<Self, TableError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(TABLE_DELIMITER)
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| TableError::Malformed { source: e })?
            .iter()
            .map(str::to_string)
            .collect();

        let coordinate_indices: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| matches!(h.as_str(), "x" | "X" | "y" | "Y"))
            .map(|(i, _)| i)
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| TableError::Malformed { source: e })?;
            let mut values: Vec<String> = record.iter().map(str::to_string).collect();
            for &i in &coordinate_indices {
                if let Some(v) = values.get_mut(i) {
                    *v = scrub_numeric_text(v);
                }
            }
            records.push(values);
        }

        Ok(Self { headers, records })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Lowercase `x`/`y` win over `X`/`Y` when a table carries both.
    pub fn resolve_coordinate_columns(&self) -> Result<CoordinateColumns, TableError> {
        let x = ["x", "X"]
            .into_iter()
            .find(|n| self.header_index(n).is_some());
        let y = ["y", "Y"]
            .into_iter()
            .find(|n| self.header_index(n).is_some());
        match (x, y) {
            (Some(x), Some(y)) => Ok(CoordinateColumns { x, y }),
            _ => Err(TableError::MissingCoordinateColumns),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(|values| Row {
            table: self,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a DataTable,
    values: &'a [String],
}

impl Row<'_> {
    /// Lookup with fallback: an absent column or a short record reads as "".
    pub fn field(&self, name: &str) -> &str {
        self.table
            .header_index(name)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

// Coordinate text as spreadsheets export it: embedded U+00A0 group
// separators and stray surrounding whitespace.
fn scrub_numeric_text(value: &str) -> String {
    value.replace('\u{a0}', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{DataTable, TableError};

    #[test]
    fn trims_headers_and_scrubs_coordinate_text() {
        let table = DataTable::from_delimited_str(
            " name ; X ;Y\nsidi bou said;\u{a0}36,87 ;10,34\u{a0}\n",
        )
        .expect("parse table");
        assert_eq!(table.headers(), &["name", "X", "Y"]);

        let row = table.rows().next().expect("one row");
        assert_eq!(row.field("X"), "36,87");
        assert_eq!(row.field("Y"), "10,34");
        // Non-coordinate values are left as-is.
        assert_eq!(row.field("name"), "sidi bou said");
    }

    #[test]
    fn lowercase_coordinate_columns_win() {
        let table = DataTable::from_delimited_str("x;X;y;Y\n1;2;3;4\n").expect("parse table");
        let cols = table.resolve_coordinate_columns().expect("resolve");
        assert_eq!(cols.x, "x");
        assert_eq!(cols.y, "y");
    }

    #[test]
    fn uppercase_coordinate_columns_are_accepted() {
        let table = DataTable::from_delimited_str("X;Y\n9,0;34,0\n").expect("parse table");
        let cols = table.resolve_coordinate_columns().expect("resolve");
        assert_eq!(cols.x, "X");
        assert_eq!(cols.y, "Y");
    }

    #[test]
    fn missing_coordinate_pair_is_an_error() {
        let table = DataTable::from_delimited_str("name;x\na;1\n").expect("parse table");
        assert!(matches!(
            table.resolve_coordinate_columns(),
            Err(TableError::MissingCoordinateColumns)
        ));
    }

    #[test]
    fn absent_columns_and_short_records_read_as_empty() {
        let table =
            DataTable::from_delimited_str("a;b;c\nonly-a\nfull;row;here\n").expect("parse table");
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].field("a"), "only-a");
        assert_eq!(rows[0].field("c"), "");
        assert_eq!(rows[1].field("c"), "here");
        assert_eq!(rows[1].field("no-such-column"), "");
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = DataTable::from_path("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
