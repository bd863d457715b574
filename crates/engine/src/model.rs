use chrono::NaiveDateTime;
use serde::Serialize;

use crate::settings::TableSettings;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One named measurement at a point in time.
///
/// Entries are immutable once built; the fields are only reachable through
/// accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    name: String,
    value: f64,
    timestamp: NaiveDateTime,
}

impl Entry {
    pub fn new(name: impl Into<String>, value: f64, timestamp: NaiveDateTime) -> Self {
        Self { name: name.into(), value, timestamp }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Everything extracted from one worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Reference values, drawn as flat lines. Never filtered.
    pub baselines: Vec<Entry>,
    /// The time series, in worksheet row order.
    pub entries: Vec<Entry>,
    pub settings: TableSettings,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_baseline(&mut self, entry: Entry) {
        self.baselines.push(entry);
    }
}
