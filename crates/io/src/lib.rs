// Spreadsheet decoding

pub mod csv;
pub mod error;
pub mod xlsx;

use std::path::Path;

use sheetdash_engine::Worksheet;

pub use error::ReadError;

/// Read every worksheet of a local file. `.csv`/`.tsv`/`.txt` files go
/// through the CSV reader (tab-separated for `.tsv`, guessed otherwise),
/// anything else through calamine.
pub fn read_path(path: &Path) -> Result<Vec<Worksheet>, ReadError> {
    let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let delimiter = match ext.as_str() {
        "tsv" => Some(b'\t'),
        "csv" | "txt" => None,
        _ => return xlsx::read_bytes(bytes),
    };
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(vec![csv::read_bytes(&title, &bytes, delimiter)?])
}

