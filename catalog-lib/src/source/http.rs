//! HTTP data source

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use url::Url;

use super::DataSource;
use crate::error::ConfigError;
use crate::error::FetchError;

/// Fetches a JSON collection with a GET request.
///
/// Any non-2xx status is a failure regardless of the body. This source is
/// cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use catalog_lib::source::HttpSource;
///
/// let source = HttpSource::builder("https://catalog.local/api/services")
///     .timeout(Duration::from_secs(15))
///     .header("X-Requested-With", "catalog")
///     .build()?;
/// ```
#[derive(Clone)]
pub struct HttpSource {
    inner: Arc<HttpSourceInner>,
}

struct HttpSourceInner {
    url: Url,
    http_client: Client,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

impl HttpSource {
    /// Creates a source with default settings.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::builder(url).build()
    }

    /// Creates a new builder for the given data URL.
    pub fn builder(url: impl AsRef<str>) -> HttpSourceBuilder {
        HttpSourceBuilder::new(url.as_ref())
    }

    /// Returns the data URL.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<serde_json::Value, FetchError> {
        let mut request = self
            .inner
            .http_client
            .get(self.inner.url.clone())
            .header(ACCEPT, "application/json");

        for (name, value) in &self.inner.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(FetchError::http(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::parse_with_body(e.to_string(), body))
    }

    fn locator(&self) -> &str {
        self.inner.url.as_str()
    }
}

/// Builder for constructing an [`HttpSource`].
pub struct HttpSourceBuilder {
    url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    http_client: Option<Client>,
}

impl HttpSourceBuilder {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: None,
            connect_timeout: None,
            headers: Vec::new(),
            http_client: None,
        }
    }

    /// Sets the request timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client, so it is ignored if a
    /// custom client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every fetch.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a custom HTTP client, e.g. one carrying a session cookie store.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`HttpSource`].
    pub fn build(self) -> Result<HttpSource, ConfigError> {
        let url = Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| ConfigError::HttpClient(e.to_string()))?
            }
        };

        Ok(HttpSource {
            inner: Arc::new(HttpSourceInner {
                url,
                http_client,
                timeout: self.timeout,
                headers: self.headers,
            }),
        })
    }
}
