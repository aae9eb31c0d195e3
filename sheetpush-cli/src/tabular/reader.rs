//! Decode spreadsheet and delimited-text buffers into a raw cell grid
//!
//! Workbooks (xlsx, xlsb, xls, ods) are read with calamine; only the first
//! sheet is used. Delimited text is read with the csv crate and yields string
//! cells only; input that is not valid UTF-8 is decoded as Latin-1.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Ods, Reader, Xls, Xlsb, Xlsx};
use log::debug;

use super::{CellValue, FileKind, ParseError, Table};

/// Parse a file buffer into a [`Table`]
///
/// Fails with [`ParseError::EmptyInput`] when the first sheet has no data rows
/// (including a header-only sheet), and with [`ParseError::Decode`] when the
/// underlying reader rejects the content.
pub fn parse(bytes: &[u8], kind: FileKind) -> Result<Table, ParseError> {
    let grid = read_grid(bytes, kind)?;
    debug!(
        "Decoded {} grid: {} lines, {} columns in header row",
        kind,
        grid.len(),
        grid.first().map(Vec::len).unwrap_or(0)
    );

    Table::from_grid(grid).ok_or(ParseError::EmptyInput)
}

/// Read a file from disk, detecting its kind from the extension
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Table, ParseError> {
    let path = path.as_ref();
    let kind = FileKind::from_path(path)?;
    let bytes = std::fs::read(path)?;
    parse(&bytes, kind)
}

/// Materialize the first sheet as rows of cells, without header handling
pub fn read_grid(bytes: &[u8], kind: FileKind) -> Result<Vec<Vec<CellValue>>, ParseError> {
    let cursor = Cursor::new(bytes);
    match kind {
        FileKind::Xlsx => first_sheet(Xlsx::new(cursor).map_err(decode_error)?),
        FileKind::Xlsb => first_sheet(Xlsb::new(cursor).map_err(decode_error)?),
        FileKind::Xls => first_sheet(Xls::new(cursor).map_err(decode_error)?),
        FileKind::Ods => first_sheet(Ods::new(cursor).map_err(decode_error)?),
        FileKind::Csv => delimited(bytes, b','),
        FileKind::Tsv => delimited(bytes, b'\t'),
    }
}

fn decode_error<E: std::fmt::Display>(err: E) -> ParseError {
    ParseError::Decode(err.to_string())
}

fn first_sheet<RS, R>(mut workbook: R) -> Result<Vec<Vec<CellValue>>, ParseError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    if let Some(name) = workbook.sheet_names().first() {
        debug!("Reading first sheet '{}'", name);
    }

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(decode_error)?,
        None => return Err(ParseError::EmptyInput),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect())
}

fn delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Vec<CellValue>>, ParseError> {
    // Files that are not valid UTF-8 are read as Latin-1, one char per byte
    let utf8 = std::str::from_utf8(bytes).is_ok();
    if !utf8 {
        debug!("Delimited input is not UTF-8, decoding as Latin-1");
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    // Empty fields are absent cells, not empty strings
                    if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::String(decode_field(field, utf8))
                    }
                })
                .collect(),
        );
    }

    Ok(grid)
}

fn decode_field(field: &[u8], utf8: bool) -> String {
    if utf8 {
        String::from_utf8_lossy(field).into_owned()
    } else {
        field.iter().map(|&b| char::from(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_bytes(build: impl FnOnce(&mut Workbook)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(&mut workbook);
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_csv() {
        let data = b"id,tagList\n1,a\n,\n2,b\n";
        let table = parse(data, FileKind::Csv).unwrap();

        assert_eq!(table.headers(), &["id".to_string(), "tagList".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("id"), Some(&CellValue::from("1")));
        assert_eq!(table.rows()[1].get("tagList"), Some(&CellValue::from("b")));
    }

    #[test]
    fn test_parse_csv_keeps_values_as_strings() {
        let table = parse(b"id,active\n42,true\n", FileKind::Csv).unwrap();
        assert_eq!(table.rows()[0].get("id"), Some(&CellValue::from("42")));
        assert_eq!(table.rows()[0].get("active"), Some(&CellValue::from("true")));
    }

    #[test]
    fn test_parse_csv_latin1_bytes() {
        let table = parse(b"id,cidade\n1,S\xE3o Paulo\n2,Bras\xEDlia\n", FileKind::Csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("cidade"), Some(&CellValue::from("São Paulo")));
        assert_eq!(table.rows()[1].get("cidade"), Some(&CellValue::from("Brasília")));
    }

    #[test]
    fn test_parse_csv_utf8_multibyte() {
        let table = parse("id,cidade\n1,São Paulo\n".as_bytes(), FileKind::Csv).unwrap();
        assert_eq!(table.rows()[0].get("cidade"), Some(&CellValue::from("São Paulo")));
    }

    #[test]
    fn test_parse_tsv_ragged_rows() {
        let table = parse(b"a\tb\tc\nx\n1\t2\t3\t4\n", FileKind::Tsv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("c"), Some(&CellValue::Null));
        assert_eq!(table.rows()[1].len(), 3);
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        assert!(matches!(
            parse(b"id,tagList\n", FileKind::Csv),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(parse(b"", FileKind::Csv), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_parse_xlsx_typed_cells() {
        let bytes = xlsx_bytes(|wb| {
            let sheet = wb.add_worksheet();
            sheet.write_string(0, 0, "ID").unwrap();
            sheet.write_string(0, 1, "TagList").unwrap();
            sheet.write_string(0, 2, "Active").unwrap();
            sheet.write_number(1, 0, 101).unwrap();
            sheet.write_string(1, 1, "urgent").unwrap();
            sheet.write_boolean(1, 2, true).unwrap();
            sheet.write_number(2, 0, 2.5).unwrap();
        });

        let table = parse(&bytes, FileKind::Xlsx).unwrap();
        assert_eq!(table.headers().len(), 3);
        assert_eq!(table.rows()[0].get("ID"), Some(&CellValue::Int(101)));
        assert_eq!(table.rows()[0].get("Active"), Some(&CellValue::Bool(true)));
        assert_eq!(table.rows()[1].get("ID"), Some(&CellValue::Float(2.5)));
        assert_eq!(table.rows()[1].get("TagList"), Some(&CellValue::Null));
    }

    #[test]
    fn test_parse_xlsx_uses_first_sheet_only() {
        let bytes = xlsx_bytes(|wb| {
            let first = wb.add_worksheet();
            first.write_string(0, 0, "id").unwrap();
            first.write_string(1, 0, "from-first").unwrap();
            let second = wb.add_worksheet();
            second.write_string(0, 0, "id").unwrap();
            second.write_string(1, 0, "from-second").unwrap();
            second.write_string(2, 0, "another").unwrap();
        });

        let table = parse(&bytes, FileKind::Xlsx).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].get("id"), Some(&CellValue::from("from-first")));
    }

    #[test]
    fn test_parse_xlsx_skips_blank_lines() {
        let bytes = xlsx_bytes(|wb| {
            let sheet = wb.add_worksheet();
            sheet.write_string(0, 0, "id").unwrap();
            sheet.write_string(1, 0, "1").unwrap();
            sheet.write_string(4, 0, "2").unwrap();
        });

        let table = parse(&bytes, FileKind::Xlsx).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let bytes = xlsx_bytes(|wb| {
            let sheet = wb.add_worksheet();
            sheet.write_string(0, 0, "id").unwrap();
            sheet.write_number(1, 0, 7).unwrap();
        });

        assert_eq!(
            parse(&bytes, FileKind::Xlsx).unwrap(),
            parse(&bytes, FileKind::Xlsx).unwrap()
        );
    }

    #[test]
    fn test_garbage_workbook_is_decode_error() {
        let result = parse(b"definitely not a zip archive", FileKind::Xlsx);
        assert!(matches!(result, Err(ParseError::Decode(_))));
    }

    #[test]
    fn test_header_only_xlsx_is_empty() {
        let bytes = xlsx_bytes(|wb| {
            let sheet = wb.add_worksheet();
            sheet.write_string(0, 0, "id").unwrap();
            sheet.write_string(0, 1, "tagList").unwrap();
        });

        assert!(matches!(
            parse(&bytes, FileKind::Xlsx),
            Err(ParseError::EmptyInput)
        ));
    }
}
