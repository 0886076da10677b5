//! Configuration error types

use std::path::PathBuf;

/// Errors raised while configuring an engine or a data source.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The engine needs at least one column.
    #[error("at least one column is required")]
    NoColumns,

    /// Items per page must be positive.
    #[error("items per page must be greater than zero")]
    ZeroItemsPerPage,

    /// The data URL could not be parsed.
    #[error("invalid data URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    /// A settings file could not be read or parsed.
    #[error("settings error in {path:?}: {message}")]
    Settings {
        /// Path of the settings file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl ConfigError {
    /// Creates a new settings error.
    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }
}
