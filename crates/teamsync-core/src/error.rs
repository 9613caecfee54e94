//! Error types for directory sync and Terraform generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `SyncError`.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while fetching groups or generating files.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured provider has no backend.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Credential or client construction failure.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A page request failed or returned an unusable body.
    #[error("Failed to fetch groups: {0}")]
    Fetch(String),

    /// A directory record lacked a required field.
    #[error("Group record is missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The server kept returning continuation links past the configured cap.
    #[error("Pagination limit exceeded: server still had more pages after {max_pages} page(s)")]
    PaginationLimitExceeded { max_pages: usize },

    /// Two groups normalize to the same resource identifier.
    #[error("Groups '{first}' and '{second}' both normalize to identifier '{identifier}'")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// Directory creation failed.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a generated file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl SyncError {
    /// Wraps a transport-level failure into a fetch error.
    pub(crate) fn fetch(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Fetch(format!("{context}: {err}"))
    }
}
