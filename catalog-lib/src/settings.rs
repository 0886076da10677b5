//! Serializable table settings

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::query::Direction;

/// Default rows per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Default text of the empty-state row.
pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "No results found";

/// Default prefix of the error row.
pub const DEFAULT_ERROR_MESSAGE: &str = "Error loading data";

/// User-tunable table settings.
///
/// Every field has a default, so a settings file only lists what it changes:
///
/// ```json
/// { "items_per_page": 25, "default_sort_field": "name" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Rows per page.
    pub items_per_page: usize,
    /// Text of the empty-state row.
    pub no_results_message: String,
    /// Prefix of the error row.
    pub error_message: String,
    /// Initial sort field. `None` sorts by the first column.
    pub default_sort_field: Option<String>,
    /// Initial sort direction.
    pub default_direction: Direction,
    /// Request timeout for HTTP sources, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            no_results_message: DEFAULT_NO_RESULTS_MESSAGE.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            default_sort_field: None,
            default_direction: Direction::Asc,
            timeout_secs: None,
        }
    }
}

impl TableSettings {
    /// Reads settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::settings(path, e.to_string()))?;
        Self::from_json_str(&text).map_err(|e| match e {
            ConfigError::Settings { message, .. } => ConfigError::settings(path, message),
            other => other,
        })
    }

    /// Parses settings from JSON text and validates them.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::settings("<inline>", e.to_string()))?;
        if settings.items_per_page == 0 {
            return Err(ConfigError::ZeroItemsPerPage);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings =
            TableSettings::from_json_str(r#"{"items_per_page": 25, "default_direction": "desc"}"#)
                .unwrap();
        assert_eq!(settings.items_per_page, 25);
        assert_eq!(settings.default_direction, Direction::Desc);
        assert_eq!(settings.no_results_message, DEFAULT_NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = TableSettings::from_json_str(r#"{"items_per_page": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroItemsPerPage));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = TableSettings::from_json_file("/nonexistent/catalog/settings.json").unwrap_err();
        assert!(err.to_string().contains("settings.json"));
    }
}
