//! Fetch error types

/// Errors that can occur while loading table data.
///
/// Every variant takes the same path through the engine: the error hook is
/// called once and the table body is replaced by a single error row. The
/// variants only differ in the message they carry.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx HTTP response. The body is kept as the message.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Transport failure: connection refused, DNS, timeout, TLS.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response was not the JSON shape the table needs.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// Failure reported by a non-HTTP data source.
    #[error("Data source error: {0}")]
    Source(String),
}

impl FetchError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Creates a new data source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw body of a response that failed to parse.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Parse { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}
