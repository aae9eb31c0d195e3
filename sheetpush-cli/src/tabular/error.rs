use thiserror::Error;

/// Errors raised while turning a file into a [`Table`](super::Table)
///
/// All variants are recoverable: the caller can report the message and ask
/// for another file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Spreadsheet is empty")]
    EmptyInput,

    #[error("Error parsing file: {0}")]
    Decode(String),

    #[error("Unsupported file type '{0}': expected .xlsx, .xlsm, .xlsb, .xls, .ods, .csv or .tsv")]
    UnsupportedKind(String),

    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        ParseError::Decode(err.to_string())
    }
}
