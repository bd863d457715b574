//! A remote directory document listing further remote documents.
//!
//! Each row of the directory's first worksheet is `[name, id1, id2, ...]`.
//! One id becomes a single-remote source, several ids a remote-list source.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use sheetdash_engine::Worksheet;

use crate::error::SourceError;
use crate::fetch::DocumentFetcher;
use crate::tabular::TabularSource;

/// A directory row after empty cells have been dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRow {
    pub name: String,
    pub ids: Vec<String>,
}

/// Read the directory rows of a worksheet. Rows without a name or without
/// any id are skipped.
pub fn directory_rows(sheet: &Worksheet) -> Vec<DirectoryRow> {
    sheet
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let name = match row.first() {
                Some(cell) if !cell.is_empty() => cell.raw_display(),
                _ => {
                    if row.iter().any(|c| !c.is_empty()) {
                        log::warn!("{}: row {} has no name, skipped", sheet.title, i + 1);
                    }
                    return None;
                }
            };
            let ids: Vec<String> = row[1..]
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.raw_display())
                .collect();
            if ids.is_empty() {
                log::warn!("{}: row {} ('{}') lists no documents, skipped", sheet.title, i + 1, name);
                return None;
            }
            Some(DirectoryRow { name, ids })
        })
        .collect()
}

/// Turn directory rows into (unpolled) tabular sources.
pub fn discover(sheet: &Worksheet, fetcher: &Arc<dyn DocumentFetcher>) -> Vec<TabularSource> {
    directory_rows(sheet)
        .into_iter()
        .map(|row| {
            let DirectoryRow { name, mut ids } = row;
            if ids.len() == 1 {
                let id = ids.remove(0);
                TabularSource::remote(name, id, Arc::clone(fetcher))
            } else {
                TabularSource::remote_list(name, ids, Arc::clone(fetcher))
            }
        })
        .collect()
}

pub struct MultiSource {
    directory_id: String,
    fetcher: Arc<dyn DocumentFetcher>,
    sources: Vec<TabularSource>,
}

impl MultiSource {
    pub fn new(directory_id: impl Into<String>, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            directory_id: directory_id.into(),
            fetcher,
            sources: Vec::new(),
        }
    }

    pub fn directory_id(&self) -> &str {
        &self.directory_id
    }

    /// Sub-sources found by the most recent poll, in directory row order.
    pub fn sources(&self) -> &[TabularSource] {
        &self.sources
    }

    pub fn poll(&mut self) -> Result<(), SourceError> {
        self.poll_at(Local::now().naive_local())
    }

    /// Re-read the directory and poll every source it lists.
    ///
    /// Failing to read the directory itself fails the poll and keeps the
    /// current sub-sources. A sub-source that fails to poll is logged and
    /// keeps the tables it had under the same name and ids, if any.
    pub fn poll_at(&mut self, now: NaiveDateTime) -> Result<(), SourceError> {
        let bytes = self.fetcher.fetch(&self.directory_id)?;
        let sheet = sheetdash_io::xlsx::read_first_sheet(bytes).map_err(|e| {
            SourceError::from_read(&format!("directory {}", self.directory_id), e)
        })?;

        let mut discovered = discover(&sheet, &self.fetcher);
        log::info!(
            "directory {}: {} source(s)",
            self.directory_id,
            discovered.len()
        );

        for source in &mut discovered {
            if let Err(e) = source.poll_at(now) {
                log::warn!("{}: {}", source.name(), e);
                if let Some(previous) = self.sources.iter().find(|p| p.same_target(source)) {
                    source.inherit(previous);
                }
            }
        }

        self.sources = discovered;
        Ok(())
    }
}
