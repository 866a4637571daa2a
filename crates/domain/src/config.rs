//! Harness configuration.
//!
//! Built once at startup and read-only for the rest of the run.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::Headers;

/// Default connection-establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default total request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default number of cases in flight; one keeps execution sequential.
pub const DEFAULT_CONCURRENCY: usize = 1;

const fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

const fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Static configuration shared by every case of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URL every case path is appended to, e.g. `http://localhost:8080/api`.
    /// May be left out of a suite file and supplied on the command line.
    #[serde(default)]
    pub base_url: String,
    /// Headers applied to every request unless a case overrides them.
    #[serde(default)]
    pub default_headers: Headers,
    /// Connection-establishment timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total request timeout in milliseconds, unless a case overrides it.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Maximum number of cases in flight.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl HarnessConfig {
    /// Creates a configuration with default timeouts and no default headers.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: Headers::new(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Adds a default header (builder pattern).
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Sets both timeouts (builder pattern).
    #[must_use]
    pub const fn with_timeouts(mut self, connect_timeout_ms: u64, request_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self.request_timeout_ms = request_timeout_ms;
        self
    }

    /// Sets the concurrency limit (builder pattern).
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Connection-establishment timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Default total request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Checks that the configuration can run any case at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL, or if
    /// a timeout or the concurrency limit is zero.
    pub fn validate(&self) -> DomainResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {}",
                url.scheme(),
                self.base_url
            )));
        }
        if self.connect_timeout_ms == 0 || self.request_timeout_ms == 0 {
            return Err(DomainError::InvalidConfig(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(DomainError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
