//! Presentation plan: what each tab shows, in which order.
//!
//! Renderers consume [`TabView`]s and never look at raw tables.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::{Entry, Table};
use crate::select::select;

/// Longest series label before it gets cut and suffixed with `...`.
pub const LABEL_MAX_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShownEntry {
    #[serde(flatten)]
    pub entry: Entry,
    /// Part of the always-shown recent window rather than the ranked top.
    pub recent: bool,
}

/// A baseline drawn as a flat line across the shown time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineLine {
    pub name: String,
    pub value: f64,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub name: String,
    pub axis: String,
    pub priority: i64,
    pub shown: Vec<ShownEntry>,
    pub baselines: Vec<BaselineLine>,
}

/// The tab for one table, or `None` when nothing would be drawn.
///
/// Hidden tables are not filtered here; see [`plan_tabs`].
pub fn tab_view(table: &Table) -> Option<TabView> {
    let selection = select(table);
    let (from, to) = selection.span()?;

    let shown = selection
        .top
        .into_iter()
        .map(|entry| ShownEntry { entry, recent: false })
        .chain(selection.recent.into_iter().map(|entry| ShownEntry { entry, recent: true }))
        .collect();

    let baselines = table
        .baselines
        .iter()
        .map(|b| BaselineLine { name: b.name().to_string(), value: b.value(), from, to })
        .collect();

    Some(TabView {
        name: table.settings.name.clone(),
        axis: table.settings.axis.clone(),
        priority: table.settings.priority,
        shown,
        baselines,
    })
}

/// Tabs for a source's tables: hidden tables dropped, highest priority
/// first (stable among equal priorities), empty selections skipped.
pub fn plan_tabs(tables: &[Table]) -> Vec<TabView> {
    let mut visible: Vec<&Table> = tables.iter().filter(|t| !t.settings.hide).collect();
    visible.sort_by(|a, b| b.settings.priority.cmp(&a.settings.priority));
    visible.into_iter().filter_map(tab_view).collect()
}

/// Index of the tab to show on render pass `pass`.
pub fn active_tab(pass: u64, tab_count: usize) -> Option<usize> {
    if tab_count == 0 {
        return None;
    }
    Some((pass % tab_count as u64) as usize)
}

/// Shorten a label to fit a legend.
pub fn abbreviate(label: &str, max_len: usize) -> String {
    let keep = max_len.saturating_sub(3);
    if label.chars().count() > keep {
        let mut out: String = label.chars().take(keep).collect();
        out.push_str("...");
        out
    } else {
        label.to_string()
    }
}

/// Legend label for a baseline line.
pub fn baseline_label(name: &str) -> String {
    abbreviate(&format!("b:{}", name), LABEL_MAX_LEN)
}
