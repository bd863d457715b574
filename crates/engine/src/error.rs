use thiserror::Error;

/// A settings directive whose value cannot take the option's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("setting '{key}' expects {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
    /// Bare `s:<name>` used on an option that is not boolean.
    #[error("setting '{key}' expects {expected}; write s:{key}=<value>")]
    MissingValue {
        key: &'static str,
        expected: &'static str,
    },
}

/// Building a table stopped at a directive that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("worksheet '{sheet}', row {row}: {source}")]
pub struct BuildError {
    pub sheet: String,
    /// 1-based, as shown in spreadsheet applications.
    pub row: usize,
    pub source: SettingError,
}
