//! In-memory data source

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use super::DataSource;
use crate::error::FetchError;

#[derive(Debug, Clone)]
enum Canned {
    Payload(serde_json::Value),
    Failure(String),
}

/// A data source that serves a payload held in memory.
///
/// Useful for headless pages and tests. Clones share the payload, so a test
/// can keep a handle and change what the next fetch returns.
///
/// # Example
///
/// ```
/// use catalog_lib::source::MemorySource;
///
/// let source = MemorySource::new(serde_json::json!([{ "id": "AFF-1" }]));
/// source.fail_with("backend offline");
/// source.set_payload(serde_json::json!([]));
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    canned: Arc<RwLock<Canned>>,
    fetches: Arc<AtomicUsize>,
}

impl MemorySource {
    /// Creates a source that returns `payload`.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            canned: Arc::new(RwLock::new(Canned::Payload(payload))),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a source whose fetches fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let source = Self::new(serde_json::Value::Null);
        source.fail_with(message);
        source
    }

    /// Replaces the payload returned by later fetches.
    pub fn set_payload(&self, payload: serde_json::Value) {
        if let Ok(mut guard) = self.canned.write() {
            *guard = Canned::Payload(payload);
        }
    }

    /// Makes later fetches fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.canned.write() {
            *guard = Canned::Failure(message.into());
        }
    }

    /// Returns how many fetches have been made.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self) -> Result<serde_json::Value, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let canned = self
            .canned
            .read()
            .map_err(|_| FetchError::source("memory source lock poisoned"))?
            .clone();

        match canned {
            Canned::Payload(payload) => Ok(payload),
            Canned::Failure(message) => Err(FetchError::source(message)),
        }
    }

    fn locator(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_payload_and_count() {
        let source = MemorySource::new(serde_json::json!([{ "id": "AFF-1" }]));
        let handle = source.clone();

        assert_eq!(source.fetch().await.unwrap()[0]["id"], "AFF-1");
        handle.set_payload(serde_json::json!([]));
        assert_eq!(source.fetch().await.unwrap(), serde_json::json!([]));
        assert_eq!(handle.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = MemorySource::failing("backend offline");
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "Data source error: backend offline");
        assert_eq!(source.locator(), "memory");
    }
}
