//! Configuration loading
//!
//! Settings come from a YAML file and can be overridden by `TEAMSYNC_*`
//! environment variables.

pub mod settings;

pub use settings::{AzureSettings, Settings, DEFAULT_PROVIDER};
