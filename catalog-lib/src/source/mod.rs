//! Data sources for table contents
//!
//! A data source produces the raw JSON payload the engine turns into items.
//! The engine does not care where the payload comes from.

mod http;
mod memory;

pub use http::*;
pub use memory::*;

use async_trait::async_trait;

use crate::error::FetchError;

/// Trait for table data sources.
///
/// Implementations perform one fetch per call and never retry. Every
/// failure (transport, status, body) is reported as a [`FetchError`].
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use catalog_lib::error::FetchError;
/// use catalog_lib::source::DataSource;
///
/// struct Fixed;
///
/// #[async_trait]
/// impl DataSource for Fixed {
///     async fn fetch(&self) -> Result<serde_json::Value, FetchError> {
///         Ok(serde_json::json!([{ "id": "SVC-1" }]))
///     }
///
///     fn locator(&self) -> &str {
///         "fixed"
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the current payload.
    async fn fetch(&self) -> Result<serde_json::Value, FetchError>;

    /// Human-readable location of the data, used in log messages.
    fn locator(&self) -> &str;
}
