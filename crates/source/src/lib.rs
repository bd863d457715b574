// Dashboard sources
//
// A source owns the tables it last read successfully. Polling builds a
// fresh set of tables and only swaps them in when every document read
// and every directive applied cleanly.

pub mod error;
pub mod fetch;
pub mod multi;
pub mod tabular;

pub use error::SourceError;
pub use fetch::{DocumentFetcher, ExportClient, DEFAULT_EXPORT_URL};
pub use multi::MultiSource;
pub use tabular::{Origin, TabularSource};

/// A top-level dashboard input: either a leaf source or a directory of them.
pub enum Interface {
    Tabular(TabularSource),
    Multi(MultiSource),
}

impl Interface {
    pub fn poll(&mut self) -> Result<(), SourceError> {
        match self {
            Interface::Tabular(source) => source.poll(),
            Interface::Multi(source) => source.poll(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Interface::Tabular(source) => source.name(),
            Interface::Multi(source) => source.directory_id(),
        }
    }

    /// The leaf sources to render, a directory expanded into its entries.
    pub fn leaves(&self) -> &[TabularSource] {
        match self {
            Interface::Tabular(source) => std::slice::from_ref(source),
            Interface::Multi(source) => source.sources(),
        }
    }
}

impl From<TabularSource> for Interface {
    fn from(source: TabularSource) -> Self {
        Interface::Tabular(source)
    }
}

impl From<MultiSource> for Interface {
    fn from(source: MultiSource) -> Self {
        Interface::Multi(source)
    }
}
