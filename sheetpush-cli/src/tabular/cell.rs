//! Cell value representation for parsed tables

use calamine::Data;
use serde::{Serialize, Serializer};

/// A single cell value, as read from a spreadsheet or delimited text file
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Undefined cell (no value in the source grid)
    #[default]
    Null,
    /// Text value, possibly empty
    String(String),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl CellValue {
    /// A cell is blank when it is undefined or an empty string
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Convert to JSON value for request variables
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::String(s) => serde_json::Value::String(s.clone()),
            CellValue::Int(i) => serde_json::json!(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    /// Text used when a cell is promoted to a column header
    pub fn header_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Null,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => from_float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            // Dates keep their serial number, as the workbook stores them
            Data::DateTime(dt) => from_float(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::String(s.clone()),
            Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::String(e.to_string()),
        }
    }
}

/// Whole floats become integers so `1.0` is submitted as `1`
fn from_float(f: f64) -> CellValue {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(" ").is_blank());
        assert!(!CellValue::Int(0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn test_whole_floats_become_ints() {
        assert_eq!(CellValue::from(&Data::Float(42.0)), CellValue::Int(42));
        assert_eq!(CellValue::from(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Null);
    }

    #[test]
    fn test_to_json() {
        assert_eq!(CellValue::from("abc").to_json(), serde_json::json!("abc"));
        assert_eq!(CellValue::Int(7).to_json(), serde_json::json!(7));
        assert_eq!(CellValue::Null.to_json(), serde_json::Value::Null);
        assert_eq!(CellValue::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_header_text() {
        assert_eq!(CellValue::Null.header_text(), "");
        assert_eq!(CellValue::Int(2024).header_text(), "2024");
        assert_eq!(CellValue::from("Id").header_text(), "Id");
    }
}
