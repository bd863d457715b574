//! Per-table display settings and the `s:` directive applier.
//!
//! The option set is closed: a directive name either maps to a [`SettingKey`]
//! or is unknown. Each key has one declared type and values arriving as text
//! are coerced to it; a value that does not coerce is rejected instead of
//! being stored in some other shape.

use serde::Serialize;

use crate::error::SettingError;

/// Display settings for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSettings {
    /// Hide the table in the visualization
    pub hide: bool,
    /// Y-axis label
    pub axis: String,
    /// Tab title
    pub name: String,
    /// Higher priority tables are shown earlier
    pub priority: i64,
    /// Keep the best n results outside the recent window
    pub keep_top: usize,
    /// Keep the last n results unconditionally
    pub keep_last: usize,
    /// Rank ascending instead of descending
    pub lower_better: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            hide: false,
            axis: String::new(),
            name: String::new(),
            priority: 10,
            keep_top: 5,
            keep_last: 5,
            lower_better: false,
        }
    }
}

/// The declared type of a setting, used for coercion and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Text,
    Int,
    Count,
}

impl SettingKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::Text => "text",
            Self::Int => "an integer",
            Self::Count => "a non-negative integer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Hide,
    Axis,
    Name,
    Priority,
    KeepTop,
    KeepLast,
    LowerBetter,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        Self::Hide,
        Self::Axis,
        Self::Name,
        Self::Priority,
        Self::KeepTop,
        Self::KeepLast,
        Self::LowerBetter,
    ];

    /// Look up a directive name. Names are matched exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Axis => "axis",
            Self::Name => "name",
            Self::Priority => "priority",
            Self::KeepTop => "keep_top",
            Self::KeepLast => "keep_last",
            Self::LowerBetter => "lower_better",
        }
    }

    pub fn kind(&self) -> SettingKind {
        match self {
            Self::Hide | Self::LowerBetter => SettingKind::Bool,
            Self::Axis | Self::Name => SettingKind::Text,
            Self::Priority => SettingKind::Int,
            Self::KeepTop | Self::KeepLast => SettingKind::Count,
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TableSettings {
    /// Apply one directive.
    ///
    /// `None` is the bare `s:<name>` form, which only boolean options accept
    /// (it sets them to true). Settings are left untouched on error.
    pub fn apply(&mut self, key: SettingKey, value: Option<&str>) -> Result<(), SettingError> {
        let Some(raw) = value else {
            return match key.kind() {
                SettingKind::Bool => {
                    self.set_bool(key, true);
                    Ok(())
                }
                kind => Err(SettingError::MissingValue { key: key.name(), expected: kind.describe() }),
            };
        };

        match key.kind() {
            SettingKind::Bool => {
                let b = parse_bool(raw).ok_or_else(|| invalid(key, raw))?;
                self.set_bool(key, b);
            }
            SettingKind::Text => {
                let text = raw.to_string();
                match key {
                    SettingKey::Axis => self.axis = text,
                    _ => self.name = text,
                }
            }
            SettingKind::Int => {
                self.priority = raw.trim().parse::<i64>().map_err(|_| invalid(key, raw))?;
            }
            SettingKind::Count => {
                let n = raw.trim().parse::<usize>().map_err(|_| invalid(key, raw))?;
                match key {
                    SettingKey::KeepTop => self.keep_top = n,
                    _ => self.keep_last = n,
                }
            }
        }
        Ok(())
    }

    fn set_bool(&mut self, key: SettingKey, b: bool) {
        match key {
            SettingKey::Hide => self.hide = b,
            _ => self.lower_better = b,
        }
    }
}

fn invalid(key: SettingKey, raw: &str) -> SettingError {
    SettingError::InvalidValue {
        key: key.name(),
        expected: key.kind().describe(),
        value: raw.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
