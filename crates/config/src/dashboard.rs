use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sheetdash_source::fetch::{DEFAULT_EXPORT_URL, ID_PLACEHOLDER};
use thiserror::Error;

/// Upper bound for both intervals (one year).
pub const MAX_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seconds between two polls of every source.
    pub update_interval_secs: u64,
    /// Seconds between two render passes (one tab step each).
    pub tab_switch_interval_secs: u64,
    /// Local spreadsheet files, one source each.
    pub files: Vec<PathBuf>,
    /// Id of a remote directory document listing further documents.
    pub remote: Option<String>,
    /// Tabs drawn side by side in one row.
    pub plots_per_line: usize,
    pub fetch_timeout_secs: u64,
    pub export_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 3600,
            tab_switch_interval_secs: 10,
            files: Vec::new(),
            remote: None,
            plots_per_line: 3,
            fetch_timeout_secs: 30,
            export_url: DEFAULT_EXPORT_URL.to_string(),
        }
    }
}

/// Contents written by `sheetdash config init`.
pub fn default_config_toml() -> String {
    format!(
        r#"# sheetdash dashboard configuration

# Seconds between two polls of every source
update_interval_secs = 3600

# Seconds between two tab switches
tab_switch_interval_secs = 10

# Local spreadsheet files (xlsx, xls, xlsb, ods, csv, tsv)
files = []

# Remote directory document id, one source per row
# remote = "1AbC..."

plots_per_line = 3
fetch_timeout_secs = 30
export_url = "{}"
"#,
        DEFAULT_EXPORT_URL
    )
}

impl DashboardConfig {
    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetdash")
            .join("dashboard.toml")
    }

    /// Load from an explicit path, else the default path if it exists,
    /// else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_interval("update_interval_secs", self.update_interval_secs)?;
        check_interval("tab_switch_interval_secs", self.tab_switch_interval_secs)?;
        if self.plots_per_line == 0 {
            return Err(ConfigError::Invalid("plots_per_line must be > 0".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_secs must be > 0".into()));
        }
        if !self.export_url.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "export_url '{}' must contain {}",
                self.export_url, ID_PLACEHOLDER
            )));
        }
        Ok(())
    }

    /// True when no source is configured at all.
    pub fn has_sources(&self) -> bool {
        !self.files.is_empty() || self.remote.is_some()
    }

    /// Write the commented default file, creating the directory.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, default_config_toml()).map_err(io_err)
    }
}

fn check_interval(key: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 || secs > MAX_INTERVAL_SECS {
        return Err(ConfigError::Invalid(format!(
            "{} must be between 1 and {}, got {}",
            key, MAX_INTERVAL_SECS, secs
        )));
    }
    Ok(())
}
