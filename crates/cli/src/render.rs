// Text and JSON rendering of the tab plan.
//
// Each leaf source is a block: its name, a tab bar and the active tab's
// series. Blocks are laid out `plots_per_line` to a row.

use chrono::NaiveDateTime;
use serde::Serialize;
use sheetdash_engine::view::{abbreviate, active_tab, baseline_label, LABEL_MAX_LEN};
use sheetdash_engine::{plan_tabs, TabView};
use sheetdash_source::TabularSource;

use crate::dashboard::Dashboard;

const BLOCK_WIDTH: usize = 46;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A full text frame for render pass `pass`.
pub fn text_frame(dashboard: &Dashboard, pass: u64, plots_per_line: usize) -> String {
    let blocks: Vec<Vec<String>> = dashboard.leaves().map(|leaf| block(leaf, pass)).collect();

    let mut out = String::new();
    for row in blocks.chunks(plots_per_line.max(1)) {
        out.push_str(&side_by_side(row));
        out.push('\n');
    }
    if blocks.is_empty() {
        out.push_str("(no sources)\n\n");
    }

    match dashboard.last_update() {
        Some(t) => out.push_str(&format!("last update: {}\n", t.format(TIME_FORMAT))),
        None => out.push_str("last update: never\n"),
    }
    out
}

/// Lines of one source block.
fn block(source: &TabularSource, pass: u64) -> Vec<String> {
    let tabs = plan_tabs(source.tables());
    let mut lines = vec![source.name().to_string(), "=".repeat(source.name().chars().count())];

    let Some(active) = active_tab(pass, tabs.len()) else {
        lines.push("(nothing to show)".to_string());
        return lines;
    };

    let bar: Vec<String> = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            if i == active {
                format!("[{}]", tab.name)
            } else {
                tab.name.clone()
            }
        })
        .collect();
    lines.push(bar.join(" "));
    lines.extend(tab_lines(&tabs[active]));
    lines
}

fn tab_lines(tab: &TabView) -> Vec<String> {
    let mut lines = Vec::new();
    if tab.axis.is_empty() {
        lines.push(format!("{}:", tab.name));
    } else {
        lines.push(format!("{} ({}):", tab.name, tab.axis));
    }

    // '*' marks the recent window
    for shown in &tab.shown {
        let marker = if shown.recent { '*' } else { ' ' };
        lines.push(format!(
            "{} {:<20} {:>10} {}",
            marker,
            abbreviate(shown.entry.name(), LABEL_MAX_LEN),
            format_value(shown.entry.value()),
            shown.entry.timestamp().format("%Y-%m-%d"),
        ));
    }
    for line in &tab.baselines {
        lines.push(format!(
            "  {:<20} {:>10} ----------",
            baseline_label(&line.name),
            format_value(line.value),
        ));
    }
    lines
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Join blocks horizontally, padding each to `BLOCK_WIDTH` columns.
fn side_by_side(blocks: &[Vec<String>]) -> String {
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = String::new();
    for i in 0..height {
        let cells: Vec<String> = blocks
            .iter()
            .map(|b| {
                let line = b.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", line, width = BLOCK_WIDTH)
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct SourceReport<'a> {
    interface: &'a str,
    name: &'a str,
    last_update: Option<NaiveDateTime>,
    tabs: Vec<TabView>,
}

#[derive(Serialize)]
struct Report<'a> {
    last_update: Option<NaiveDateTime>,
    sources: Vec<SourceReport<'a>>,
}

/// The tab plan of every leaf source as JSON.
pub fn json_report(dashboard: &Dashboard) -> Result<serde_json::Value, serde_json::Error> {
    let sources = dashboard
        .interfaces()
        .iter()
        .flat_map(|interface| {
            interface.leaves().iter().map(move |leaf| SourceReport {
                interface: interface.name(),
                name: leaf.name(),
                last_update: leaf.last_update(),
                tabs: plan_tabs(leaf.tables()),
            })
        })
        .collect();

    let report = Report { last_update: dashboard.last_update(), sources };
    serde_json::to_value(report)
}
