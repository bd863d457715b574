//! Row classifier: one worksheet row in, one outcome out.
//!
//! Cells are scanned left to right:
//!
//! - a date cell sets the row timestamp and the scan goes on
//! - the first numeric cell sets the value and ends the scan
//! - text cells are checked against the markers `s:`, `b:`, `i:` in that
//!   order; anything else is a name fragment
//!
//! Settings directives are collected separately from the outcome. They take
//! effect whether or not the row itself produces an entry.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cell::Cell;
use crate::model::Entry;

static SETTING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^s:(\w+)(=?)(.*)").unwrap());
static BASELINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^b:(.*)").unwrap());
static IGNORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^i:(.*)").unwrap());

/// An `s:<name>` or `s:<name>=<value>` marker, not yet resolved against the
/// known settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    /// `None` for the bare form.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// An `i:` marker was present.
    Ignored,
    NoValue,
    NoName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Entry(Entry),
    Baseline(Entry),
    Discard(DiscardReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub directives: Vec<Directive>,
    pub outcome: RowOutcome,
}

/// Classify one row. `now` stands in for the timestamp when the row carries
/// no date cell.
pub fn classify_row(cells: &[Cell], now: NaiveDateTime) -> ClassifiedRow {
    let mut name = String::new();
    let mut timestamp: Option<NaiveDateTime> = None;
    let mut value: Option<f64> = None;
    let mut baseline = false;
    let mut ignore = false;
    let mut directives = Vec::new();

    for cell in cells {
        match cell {
            Cell::Empty => {}
            Cell::Date(dt) => timestamp = Some(*dt),
            Cell::Number(n) => {
                value = Some(*n);
                // Only one value per row
                break;
            }
            Cell::Text(text) => {
                if let Some(caps) = SETTING_RE.captures(text) {
                    let has_value = !caps[2].is_empty();
                    directives.push(Directive {
                        name: caps[1].to_string(),
                        value: has_value.then(|| caps[3].to_string()),
                    });
                } else if let Some(caps) = BASELINE_RE.captures(text) {
                    baseline = true;
                    name.push_str(&caps[1]);
                } else if IGNORE_RE.is_match(text) {
                    ignore = true;
                } else {
                    name.push_str(text);
                }
            }
        }
    }

    let outcome = if ignore {
        RowOutcome::Discard(DiscardReason::Ignored)
    } else {
        match value {
            None => RowOutcome::Discard(DiscardReason::NoValue),
            Some(_) if name.is_empty() => RowOutcome::Discard(DiscardReason::NoName),
            Some(v) => {
                let entry = Entry::new(name, v, timestamp.unwrap_or(now));
                if baseline {
                    RowOutcome::Baseline(entry)
                } else {
                    RowOutcome::Entry(entry)
                }
            }
        }
    };

    ClassifiedRow { directives, outcome }
}
