//! `sheetdash-engine`: worksheet rows in, selected entries out.
//!
//! Pure engine crate: receives decoded worksheets, returns tables and
//! selections. No network or file access.

pub mod builder;
pub mod cell;
pub mod classify;
pub mod error;
pub mod model;
pub mod select;
pub mod settings;
pub mod view;

pub use builder::{build_table, TableBuilder};
pub use cell::{Cell, Worksheet};
pub use error::{BuildError, SettingError};
pub use model::{Entry, Table};
pub use select::{select, select_entries, Selection};
pub use settings::{SettingKey, TableSettings};
pub use view::{plan_tabs, TabView};
