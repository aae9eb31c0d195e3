//! File kind detection from extensions

use std::path::Path;

use super::ParseError;

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xlsx,
    Xlsb,
    Xls,
    Ods,
    Csv,
    Tsv,
}

impl FileKind {
    /// Detect the kind from a file name or path extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        Self::from_extension(&ext)
            .ok_or_else(|| ParseError::UnsupportedKind(path.display().to_string()))
    }

    /// Map a bare extension (without the dot) to a kind
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(FileKind::Xlsx),
            "xlsb" => Some(FileKind::Xlsb),
            "xls" => Some(FileKind::Xls),
            "ods" => Some(FileKind::Ods),
            "csv" => Some(FileKind::Csv),
            "tsv" => Some(FileKind::Tsv),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Xlsx => write!(f, "xlsx"),
            FileKind::Xlsb => write!(f, "xlsb"),
            FileKind::Xls => write!(f, "xls"),
            FileKind::Ods => write!(f, "ods"),
            FileKind::Csv => write!(f, "csv"),
            FileKind::Tsv => write!(f, "tsv"),
        }
    }
}
