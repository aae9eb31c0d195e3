//! Header/row model produced by the parser

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::CellValue;

/// A parsed table: ordered headers plus ordered row records
///
/// Headers are kept exactly as they appeared in the first grid row, so they
/// may be empty or repeated.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from a raw grid: row 0 is the header row, blank rows are dropped
    ///
    /// Returns `None` when the grid has no data rows left after filtering.
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Option<Self> {
        let mut lines = grid.into_iter();
        let headers: Vec<String> = lines.next()?.iter().map(CellValue::header_text).collect();

        let rows: Vec<Row> = lines
            .filter(|line| line.iter().any(|cell| !cell.is_blank()))
            .map(|line| Row::from_cells(&headers, line))
            .collect();

        if rows.is_empty() {
            return None;
        }

        Some(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First header (in column order) whose lowercase form equals `name`
    pub fn find_header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Case-insensitive header lookup; the first matching column wins
pub fn find_header<'a>(headers: &'a [String], name: &str) -> Option<&'a str> {
    let wanted = name.to_lowercase();
    headers
        .iter()
        .find(|h| h.to_lowercase() == wanted)
        .map(String::as_str)
}

/// One data row, keyed by header name
///
/// Field order follows the first column carrying each name. When a header
/// name repeats, the last column's value is the one stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    /// Zip cells to headers; missing cells become null, cells past the last header are dropped
    pub fn from_cells(headers: &[String], cells: Vec<CellValue>) -> Self {
        let mut cells = cells.into_iter();
        let mut row = Row::default();
        for header in headers {
            let value = cells.next().unwrap_or_default();
            row.insert(header.clone(), value);
        }
        row
    }

    /// Insert or overwrite a field
    pub fn insert(&mut self, name: impl Into<String>, value: CellValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(n, v)| (n.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = Row::default();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
