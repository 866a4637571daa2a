//! Request descriptor type

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod};

/// A fully resolved outbound HTTP request.
///
/// Produced by the request builder from a test case; everything the
/// transport needs is already decided here (absolute URL, merged headers,
/// body or none, total timeout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// Final header set after merging defaults and overrides
    #[serde(default)]
    pub headers: Headers,
    /// Raw request payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Total time allowed for the exchange
    #[serde(rename = "timeout_ms", with = "crate::serde_millis")]
    pub timeout: Duration,
}

impl RequestSpec {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            timeout,
        }
    }
}
