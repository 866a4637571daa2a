//! Request Builder
//!
//! Turns a declarative [`TestCase`] into a fully resolved [`RequestSpec`].

use std::time::Duration;

use testlang_domain::{DomainError, DomainResult, HarnessConfig, Headers, RequestSpec, TestCase};

/// Resolves cases against the base URL, default headers, and timeout of a
/// harness configuration.
///
/// Pure and deterministic: the same case always yields an equal request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    default_headers: Headers,
    default_timeout: Duration,
}

impl RequestBuilder {
    /// Creates a builder from the harness configuration.
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            default_headers: config.default_headers.clone(),
            default_timeout: config.request_timeout(),
        }
    }

    /// Builds the outbound request for a case.
    ///
    /// - URL: base URL followed by the path, without slash normalization.
    /// - Headers: defaults first, case headers laid over them (case-insensitive).
    /// - Body: attached only when the method carries one and the case has one.
    /// - Timeout: the case override, else the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` if the path does not start with `/`.
    pub fn build(&self, case: &TestCase) -> DomainResult<RequestSpec> {
        if !case.path.starts_with('/') {
            return Err(DomainError::InvalidPath(case.path.clone()));
        }

        let url = format!("{}{}", self.base_url, case.path);
        let timeout = case
            .timeout_ms
            .map_or(self.default_timeout, Duration::from_millis);

        let mut request = RequestSpec::new(case.method, url, timeout);
        request.headers = self.default_headers.overlay(&case.headers);
        if case.method.allows_body() {
            request.body.clone_from(&case.body);
        }

        Ok(request)
    }
}
