//! Entry selection: which part of a table's history is worth showing.
//!
//! The newest `keep_last` entries are always shown. Of the remaining, older
//! entries only the best `keep_top` by value are kept. Both sorts are stable,
//! so entries with equal keys keep their relative order from the worksheet
//! (timestamp ties) or from the timestamp sort (value ties).

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::model::{Entry, Table};
use crate::settings::TableSettings;

/// The selected subset of a table's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Best older entries, best first.
    pub top: Vec<Entry>,
    /// The most recent window, oldest first.
    pub recent: Vec<Entry>,
}

impl Selection {
    /// Shown entries in presentation order: ranked top first, then the
    /// recent window.
    pub fn shown(&self) -> impl Iterator<Item = &Entry> {
        self.top.iter().chain(self.recent.iter())
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Earliest and latest timestamp among shown entries.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut iter = self.shown().map(Entry::timestamp);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }
}

/// Select from arbitrary entries with the given settings.
pub fn select_entries(entries: &[Entry], settings: &TableSettings) -> Selection {
    let mut by_time: Vec<Entry> = entries.to_vec();
    by_time.sort_by_key(Entry::timestamp);

    // keep_last = 0 leaves everything in the ranked pool
    let split = by_time.len().saturating_sub(settings.keep_last);
    let recent = by_time.split_off(split);
    let mut older = by_time;

    older.sort_by(|a, b| rank(a, b, settings.lower_better));
    older.truncate(settings.keep_top);

    Selection { top: older, recent }
}

/// Select from a table using its own settings.
pub fn select(table: &Table) -> Selection {
    select_entries(&table.entries, &table.settings)
}

fn rank(a: &Entry, b: &Entry, lower_better: bool) -> Ordering {
    if lower_better {
        a.value().total_cmp(&b.value())
    } else {
        b.value().total_cmp(&a.value())
    }
}
