use sheetdash_engine::BuildError;
use sheetdash_io::ReadError;
use thiserror::Error;

/// Why a poll failed. The source keeps its previous tables in every case.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File missing, network failure, timeout or non-success HTTP status.
    #[error("source unavailable: {0}")]
    Unavailable(String),
    /// The fetched bytes are not a spreadsheet with at least one worksheet.
    #[error("malformed document: {0}")]
    Malformed(String),
    /// A settings directive could not be applied.
    #[error("invalid setting: {0}")]
    InvalidSetting(#[from] BuildError),
}

impl SourceError {
    /// Wrap a reader error, naming the document it came from.
    pub fn from_read(what: &str, err: ReadError) -> Self {
        match err {
            ReadError::Io { .. } => Self::Unavailable(format!("{}: {}", what, err)),
            ReadError::Malformed(_) | ReadError::NoWorksheets => {
                Self::Malformed(format!("{}: {}", what, err))
            }
        }
    }
}
