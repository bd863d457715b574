//! CLI Exit Code Registry
//!
//! Single source of truth for `sheetdash` exit codes. Scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad args, no sources configured)    |
//! | 3    | Configuration file unreadable or invalid         |
//! | 50   | Source unavailable (missing file, network, HTTP) |
//! | 51   | Malformed document                               |
//! | 52   | Invalid setting value in a worksheet             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map the error onto it in `source_exit_code` or the command

use sheetdash_source::SourceError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (e.g. cannot write to stdout).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, no source given.
pub const EXIT_USAGE: u8 = 2;

/// Config file could not be read, parsed or validated.
pub const EXIT_CONFIG: u8 = 3;

// =============================================================================
// Sources (50-59)
// =============================================================================

/// File missing, network failure, timeout, non-success HTTP status.
pub const EXIT_SOURCE_UNAVAILABLE: u8 = 50;

/// Document is not a readable spreadsheet or has no worksheets.
pub const EXIT_SOURCE_MALFORMED: u8 = 51;

/// A `s:` directive carries a value of the wrong type.
pub const EXIT_SOURCE_INVALID_SETTING: u8 = 52;

pub fn source_exit_code(err: &SourceError) -> u8 {
    match err {
        SourceError::Unavailable(_) => EXIT_SOURCE_UNAVAILABLE,
        SourceError::Malformed(_) => EXIT_SOURCE_MALFORMED,
        SourceError::InvalidSetting(_) => EXIT_SOURCE_INVALID_SETTING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_codes_are_distinct() {
        let codes = [
            source_exit_code(&SourceError::Unavailable("x".into())),
            source_exit_code(&SourceError::Malformed("x".into())),
        ];
        assert_eq!(codes, [EXIT_SOURCE_UNAVAILABLE, EXIT_SOURCE_MALFORMED]);
        assert_ne!(EXIT_SOURCE_INVALID_SETTING, EXIT_SOURCE_MALFORMED);
    }
}
