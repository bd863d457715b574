use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// The file could not be read at all (missing, permissions, ...).
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The bytes are not a spreadsheet document calamine/csv can decode.
    #[error("not a readable spreadsheet: {0}")]
    Malformed(String),
    #[error("spreadsheet contains no worksheets")]
    NoWorksheets,
}

impl ReadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
