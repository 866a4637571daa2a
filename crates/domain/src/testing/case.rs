//! Declarative contract cases.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::{Headers, HttpMethod};

/// How an expected header value is compared with the actual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Values must be identical strings.
    #[default]
    Exact,
    /// The actual value must contain the expected substring (case-sensitive).
    Contains,
    /// The actual value must match the expected regular expression.
    Matches,
}

impl MatchMode {
    /// Get the symbol for this mode.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Exact => "==",
            Self::Contains => "contains",
            Self::Matches => "matches",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One expected response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExpectation {
    /// Header name (case-insensitive).
    pub name: String,
    /// Expected value, substring, or pattern depending on `mode`.
    pub value: String,
    /// Comparison mode.
    #[serde(default)]
    pub mode: MatchMode,
}

impl HeaderExpectation {
    /// Expects the header to equal `value` exactly.
    #[must_use]
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            mode: MatchMode::Exact,
        }
    }

    /// Expects the header to contain `value`.
    #[must_use]
    pub fn contains(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            mode: MatchMode::Contains,
        }
    }

    /// Expects the header to match the regular expression `pattern`.
    #[must_use]
    pub fn matches(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: pattern.into(),
            mode: MatchMode::Matches,
        }
    }

    /// Get a human-readable description of this expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self.mode {
            MatchMode::Exact => format!("Header '{}' equals '{}'", self.name, self.value),
            MatchMode::Contains => format!("Header '{}' contains '{}'", self.name, self.value),
            MatchMode::Matches => format!("Header '{}' matches /{}/", self.name, self.value),
        }
    }

    /// Checks that the expectation is well formed.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name or a pattern that does not compile.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidHeaderName(self.name.clone()));
        }
        if self.mode == MatchMode::Matches {
            Regex::new(&self.value).map_err(|e| DomainError::InvalidPattern {
                pattern: self.value.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// Everything a case expects from the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectations {
    /// Exact status code required.
    pub status: u16,
    /// Expected headers, evaluated in declaration order.
    #[serde(default)]
    pub headers: Vec<HeaderExpectation>,
    /// Substrings that must all appear in the body.
    #[serde(default)]
    pub body_contains: Vec<String>,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body_contains: Vec::new(),
        }
    }
}

/// Immutable description of one contract check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique identifier used in reports.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Resource path appended to the base URL; must start with `/`.
    pub path: String,
    /// Raw request payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Per-case headers laid over the default headers.
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    /// Per-case total timeout override in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Expectations about the response.
    #[serde(default)]
    pub expect: Expectations,
}

impl TestCase {
    /// Creates a case expecting `200` with no other expectations.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            headers: Headers::new(),
            timeout_ms: None,
            expect: Expectations::default(),
        }
    }

    /// Sets the request body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a per-case request header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides the total timeout for this case (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets the expected status code (builder pattern).
    #[must_use]
    pub const fn expect_status(mut self, status: u16) -> Self {
        self.expect.status = status;
        self
    }

    /// Adds a header expectation (builder pattern).
    #[must_use]
    pub fn expect_header(mut self, expectation: HeaderExpectation) -> Self {
        self.expect.headers.push(expectation);
        self
    }

    /// Adds a body fragment that must appear in the response (builder pattern).
    #[must_use]
    pub fn expect_body_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.expect.body_contains.push(fragment.into());
        self
    }

    /// Returns the number of assertions this case produces on a completed
    /// exchange.
    #[must_use]
    pub fn assertion_count(&self) -> usize {
        1 + self.expect.headers.len() + self.expect.body_contains.len()
    }

    /// Checks the structural invariants that can be verified without a
    /// network call. The path is checked later, per case, by the request
    /// builder.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name, a body on a method that never
    /// carries one, or a malformed header expectation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyCaseName);
        }
        if self.body.is_some() && !self.method.allows_body() {
            return Err(DomainError::BodyNotAllowed {
                case: self.name.clone(),
                method: self.method.to_string(),
            });
        }
        for expectation in &self.expect.headers {
            expectation.validate()?;
        }
        Ok(())
    }
}
