// CSV/TSV import
//
// A CSV file is a single worksheet titled after the file stem. Fields are
// typed by content: numbers, ISO dates, otherwise text.

use std::borrow::Cow;

use sheetdash_engine::{Cell, Worksheet};

use crate::error::ReadError;
use crate::xlsx::parse_iso_datetime;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Candidates in tie-break order. Commas come last because semicolon and
/// tab separated files often carry decimal commas or commas in names.
const CANDIDATES: [u8; 4] = [b'\t', b';', b'|', b','];

/// Lines looked at when guessing the delimiter.
const SAMPLE_LINES: usize = 20;

/// Decode delimited text into one worksheet. Without an explicit
/// `delimiter`, it is guessed from the content.
pub fn read_bytes(title: &str, bytes: &[u8], delimiter: Option<u8>) -> Result<Worksheet, ReadError> {
    let content = decode(bytes);
    let delimiter = delimiter.unwrap_or_else(|| guess_delimiter(&content));
    read_str(title, &content, delimiter)
}

/// The candidate that occurs on the most sample lines, comma if none does.
///
/// Directive rows such as `s:keep_top=2` are usually a single field, so
/// they count for no candidate.
fn guess_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    let mut best = (b',', 0);
    for delim in CANDIDATES {
        let hits = sample.iter().filter(|line| line.as_bytes().contains(&delim)).count();
        if hits > best.1 {
            best = (delim, hits);
        }
    }
    best.0
}

/// UTF-8 (with or without BOM), else Windows-1252 as written by Excel.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::WINDOWS_1252.decode_without_bom_handling(body).0,
    }
}

fn read_str(title: &str, content: &str, delimiter: u8) -> Result<Worksheet, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut sheet = Worksheet::new(title);
    for result in reader.records() {
        let record = result.map_err(|e| ReadError::Malformed(e.to_string()))?;
        sheet.rows.push(record.iter().map(parse_field).collect());
    }
    Ok(sheet)
}

fn parse_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Cell::Number(n);
        }
    }
    if let Some(dt) = parse_iso_datetime(trimmed) {
        return Cell::Date(dt);
    }
    Cell::Text(field.to_string())
}
