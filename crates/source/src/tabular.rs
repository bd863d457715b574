//! A source whose contents are one or more spreadsheets, each worksheet
//! becoming one table.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use sheetdash_engine::{build_table, Table, Worksheet};

use crate::error::SourceError;
use crate::fetch::DocumentFetcher;

/// Where a tabular source reads from.
#[derive(Clone)]
pub enum Origin {
    /// A local file; every worksheet is a table.
    LocalFile(PathBuf),
    /// One remote document; every worksheet is a table.
    Remote {
        id: String,
        fetcher: Arc<dyn DocumentFetcher>,
    },
    /// Several remote documents; only the first worksheet of each is read.
    RemoteList {
        ids: Vec<String>,
        fetcher: Arc<dyn DocumentFetcher>,
    },
}

impl Origin {
    /// Remote document ids, empty for a local file.
    pub fn ids(&self) -> &[String] {
        match self {
            Origin::LocalFile(_) => &[],
            Origin::Remote { id, .. } => std::slice::from_ref(id),
            Origin::RemoteList { ids, .. } => ids,
        }
    }

    fn same_target(&self, other: &Origin) -> bool {
        match (self, other) {
            (Origin::LocalFile(a), Origin::LocalFile(b)) => a == b,
            (Origin::Remote { id: a, .. }, Origin::Remote { id: b, .. }) => a == b,
            (Origin::RemoteList { ids: a, .. }, Origin::RemoteList { ids: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::LocalFile(path) => f.debug_tuple("LocalFile").field(path).finish(),
            Origin::Remote { id, .. } => f.debug_struct("Remote").field("id", id).finish(),
            Origin::RemoteList { ids, .. } => {
                f.debug_struct("RemoteList").field("ids", ids).finish()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabularSource {
    name: String,
    origin: Origin,
    tables: Vec<Table>,
    last_update: Option<NaiveDateTime>,
}

impl TabularSource {
    /// A local spreadsheet, named after its file name.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::with_origin(name, Origin::LocalFile(path))
    }

    pub fn remote(
        name: impl Into<String>,
        id: impl Into<String>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self::with_origin(name, Origin::Remote { id: id.into(), fetcher })
    }

    pub fn remote_list(
        name: impl Into<String>,
        ids: Vec<String>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self::with_origin(name, Origin::RemoteList { ids, fetcher })
    }

    fn with_origin(name: impl Into<String>, origin: Origin) -> Self {
        Self {
            name: name.into(),
            origin,
            tables: Vec::new(),
            last_update: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Tables from the most recent successful poll.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Time of the most recent successful poll.
    pub fn last_update(&self) -> Option<NaiveDateTime> {
        self.last_update
    }

    /// Re-read every document and rebuild the tables.
    pub fn poll(&mut self) -> Result<(), SourceError> {
        self.poll_at(Local::now().naive_local())
    }

    /// Like [`poll`](Self::poll), with `now` as the default timestamp for
    /// rows that carry no date. On error the previous tables are kept.
    pub fn poll_at(&mut self, now: NaiveDateTime) -> Result<(), SourceError> {
        let tables = self.load(now)?;
        log::info!("{}: {} table(s)", self.name, tables.len());
        self.tables = tables;
        self.last_update = Some(now);
        Ok(())
    }

    fn load(&self, now: NaiveDateTime) -> Result<Vec<Table>, SourceError> {
        match &self.origin {
            Origin::LocalFile(path) => {
                let sheets = sheetdash_io::read_path(path)
                    .map_err(|e| SourceError::from_read(&self.name, e))?;
                build_all(&sheets, now)
            }
            Origin::Remote { id, fetcher } => {
                let bytes = fetcher.fetch(id)?;
                let sheets = sheetdash_io::xlsx::read_bytes(bytes)
                    .map_err(|e| SourceError::from_read(&format!("document {}", id), e))?;
                build_all(&sheets, now)
            }
            Origin::RemoteList { ids, fetcher } => ids
                .iter()
                .map(|id| {
                    let bytes = fetcher.fetch(id)?;
                    let sheet = sheetdash_io::xlsx::read_first_sheet(bytes)
                        .map_err(|e| SourceError::from_read(&format!("document {}", id), e))?;
                    Ok(build_table(&sheet, now)?)
                })
                .collect(),
        }
    }

    /// True when both sources have the same name and read the same documents.
    pub(crate) fn same_target(&self, other: &TabularSource) -> bool {
        self.name == other.name && self.origin.same_target(&other.origin)
    }

    /// Carry over another source's tables after a failed poll.
    pub(crate) fn inherit(&mut self, previous: &TabularSource) {
        self.tables = previous.tables.clone();
        self.last_update = previous.last_update;
    }
}

fn build_all(sheets: &[Worksheet], now: NaiveDateTime) -> Result<Vec<Table>, SourceError> {
    sheets
        .iter()
        .map(|sheet| build_table(sheet, now).map_err(SourceError::from))
        .collect()
}
