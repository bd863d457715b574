// The set of interfaces a dashboard shows, and their polling.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use sheetdash_config::DashboardConfig;
use sheetdash_source::{
    DocumentFetcher, ExportClient, Interface, MultiSource, SourceError, TabularSource,
};

use crate::exit_codes::EXIT_CONFIG;
use crate::CliError;

pub struct Dashboard {
    interfaces: Vec<Interface>,
    last_update: Option<NaiveDateTime>,
}

/// One interface whose poll failed.
pub struct PollFailure {
    pub interface: String,
    pub error: SourceError,
}

impl Dashboard {
    pub fn new(interfaces: Vec<Interface>) -> Self {
        Self { interfaces, last_update: None }
    }

    /// Local files first, then the remote directory, in configuration order.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, CliError> {
        let mut interfaces: Vec<Interface> = config
            .files
            .iter()
            .map(|path| TabularSource::local(path).into())
            .collect();

        if let Some(directory) = &config.remote {
            let client = ExportClient::new(
                config.export_url.clone(),
                Duration::from_secs(config.fetch_timeout_secs),
            )
            .map_err(|e| CliError::new(EXIT_CONFIG, e.to_string()))?;
            let fetcher: Arc<dyn DocumentFetcher> = Arc::new(client);
            interfaces.push(MultiSource::new(directory.clone(), fetcher).into());
        }

        Ok(Self::new(interfaces))
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// Time of the most recent update pass.
    pub fn last_update(&self) -> Option<NaiveDateTime> {
        self.last_update
    }

    /// Poll every interface once. Failures are logged and returned; the
    /// failing interface keeps its previous tables.
    pub fn poll_all(&mut self) -> Vec<PollFailure> {
        let mut failures = Vec::new();
        for interface in &mut self.interfaces {
            if let Err(error) = interface.poll() {
                log::warn!("{}: {}", interface.name(), error);
                failures.push(PollFailure {
                    interface: interface.name().to_string(),
                    error,
                });
            }
        }
        self.last_update = Some(Local::now().naive_local());
        failures
    }

    /// Every leaf source in display order, directories expanded.
    pub fn leaves(&self) -> impl Iterator<Item = &TabularSource> {
        self.interfaces.iter().flat_map(|i| i.leaves().iter())
    }
}
