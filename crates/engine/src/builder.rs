//! Folds the classified rows of one worksheet into a [`Table`].
//!
//! Settings directives mutate the table's settings at the row where they are
//! read. Rows are processed top to bottom, so a directive only affects state
//! that is consulted after it; the selector runs on the finished table, which
//! means in practice every directive counts, but a later `s:name=` overrides
//! an earlier one.

use chrono::NaiveDateTime;

use crate::cell::{Cell, Worksheet};
use crate::classify::{classify_row, RowOutcome};
use crate::error::BuildError;
use crate::model::Table;
use crate::settings::SettingKey;

pub struct TableBuilder {
    sheet: String,
    table: Table,
    now: NaiveDateTime,
    rows_read: usize,
}

impl TableBuilder {
    /// Start a table for the worksheet titled `title`. The title becomes the
    /// initial table name.
    pub fn new(title: &str, now: NaiveDateTime) -> Self {
        let mut table = Table::new();
        table.settings.name = title.to_string();
        Self { sheet: title.to_string(), table, now, rows_read: 0 }
    }

    pub fn push_row(&mut self, cells: &[Cell]) -> Result<(), BuildError> {
        self.rows_read += 1;
        let row = classify_row(cells, self.now);

        for directive in &row.directives {
            match SettingKey::from_name(&directive.name) {
                Some(key) => {
                    self.table
                        .settings
                        .apply(key, directive.value.as_deref())
                        .map_err(|source| BuildError {
                            sheet: self.sheet.clone(),
                            row: self.rows_read,
                            source,
                        })?;
                }
                None => {
                    log::warn!(
                        "worksheet '{}', row {}: setting \"{}\" not found",
                        self.sheet,
                        self.rows_read,
                        directive.name
                    );
                }
            }
        }

        match row.outcome {
            RowOutcome::Entry(e) => self.table.add(e),
            RowOutcome::Baseline(e) => self.table.add_baseline(e),
            RowOutcome::Discard(_) => {}
        }
        Ok(())
    }

    pub fn finish(self) -> Table {
        self.table
    }
}

/// Build the table for a whole worksheet.
pub fn build_table(sheet: &Worksheet, now: NaiveDateTime) -> Result<Table, BuildError> {
    let mut builder = TableBuilder::new(&sheet.title, now);
    for row in &sheet.rows {
        builder.push_row(row)?;
    }
    Ok(builder.finish())
}
