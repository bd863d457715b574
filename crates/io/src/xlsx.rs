// Excel/ODS import (xlsx, xlsm, xls, xlsb, ods)
//
// Import only. Cells are reduced to the four shapes the ingestion engine
// understands; formulas contribute their cached values.

use std::io::{Cursor, Read, Seek};

use calamine::{open_workbook_auto_from_rs, Data, Reader, SheetType, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use sheetdash_engine::{Cell, Worksheet};

use crate::error::ReadError;

/// Maximum rows read per worksheet (guards against huge sheets)
const MAX_ROWS: usize = 65536;

/// Maximum columns read per row
const MAX_COLS: usize = 256;

/// Decode every worksheet in an in-memory workbook, in tab order.
pub fn read_bytes(bytes: Vec<u8>) -> Result<Vec<Worksheet>, ReadError> {
    let mut workbook = open(bytes)?;
    let names = worksheet_names(&workbook);
    if names.is_empty() {
        return Err(ReadError::NoWorksheets);
    }
    names.iter().map(|name| read_sheet(&mut workbook, name)).collect()
}

/// Decode only the first worksheet of an in-memory workbook.
///
/// "First" is tab order. If another tab was active when the file was saved,
/// that tab is ignored here; remote documents are read the same way.
pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Worksheet, ReadError> {
    let mut workbook = open(bytes)?;
    let name = worksheet_names(&workbook)
        .into_iter()
        .next()
        .ok_or(ReadError::NoWorksheets)?;
    read_sheet(&mut workbook, &name)
}

fn open(bytes: Vec<u8>) -> Result<Sheets<Cursor<Vec<u8>>>, ReadError> {
    open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ReadError::Malformed(format!("failed to open workbook: {}", e)))
}

/// Worksheet names in tab order. Chart sheets and other non-grid sheets are
/// skipped.
fn worksheet_names<RS: Read + Seek>(workbook: &Sheets<RS>) -> Vec<String> {
    workbook
        .sheets_metadata()
        .iter()
        .filter(|s| s.typ == SheetType::WorkSheet)
        .map(|s| s.name.clone())
        .collect()
}

fn read_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, name: &str) -> Result<Worksheet, ReadError> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| ReadError::Malformed(format!("failed to read sheet '{}': {}", name, e)))?;

    // The range begins at the first used cell, not at A1
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    let (height, width) = range
        .end()
        .map(|(r, c)| (r as usize + 1, c as usize + 1))
        .unwrap_or((0, 0));
    if height > MAX_ROWS || width > MAX_COLS {
        log::warn!(
            "sheet '{}' truncated from {}x{} to {}x{}",
            name,
            height,
            width,
            height.min(MAX_ROWS),
            width.min(MAX_COLS)
        );
    }

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset.min(MAX_ROWS)];
    let lead = col_offset.min(MAX_COLS);
    for row in range.rows().take(MAX_ROWS - rows.len()) {
        let mut cells = vec![Cell::Empty; lead];
        cells.extend(row.iter().take(MAX_COLS - lead).map(convert_cell));
        rows.push(cells);
    }

    Ok(Worksheet::with_rows(name, rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        // Booleans count as numbers, TRUE = 1
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return Cell::Number(dt.as_f64());
            }
            match dt.as_datetime() {
                Some(ndt) => Cell::Date(ndt),
                None => Cell::Number(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(ndt) => Cell::Date(ndt),
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Parse the ISO 8601 forms ODS files store dates in.
pub(crate) fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
