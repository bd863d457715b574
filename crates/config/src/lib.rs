// Configuration loading

pub mod dashboard;

pub use dashboard::{ConfigError, DashboardConfig};
