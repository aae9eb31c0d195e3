//! Tabular parser: turns spreadsheet or delimited-text bytes into a header/row table
//!
//! Only the first sheet of a workbook is read. Row 0 becomes the header row
//! verbatim and fully blank data rows are dropped.

mod cell;
mod error;
mod kind;
mod reader;
mod table;

pub use cell::CellValue;
pub use error::ParseError;
pub use kind::FileKind;
pub use reader::{parse, read_file, read_grid};
pub use table::{Row, Table, find_header};
