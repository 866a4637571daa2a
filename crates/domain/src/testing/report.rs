//! Per-case and per-run results.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AssertionOutcome;
use crate::request::HttpMethod;
use crate::response::{TransportFailure, TransportFailureKind};

/// Why a case could not be evaluated against a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseFailureKind {
    /// The case itself is malformed; nothing was sent.
    Configuration,
    /// The peer refused the connection.
    ConnectionRefused,
    /// The exchange timed out.
    Timeout,
    /// Any other transport failure.
    TransportError,
}

impl CaseFailureKind {
    /// Returns the classification name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "ConfigurationError",
            Self::ConnectionRefused => "ConnectionRefused",
            Self::Timeout => "Timeout",
            Self::TransportError => "TransportError",
        }
    }
}

impl fmt::Display for CaseFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TransportFailureKind> for CaseFailureKind {
    fn from(kind: TransportFailureKind) -> Self {
        match kind {
            TransportFailureKind::ConnectionRefused => Self::ConnectionRefused,
            TransportFailureKind::Timeout => Self::Timeout,
            TransportFailureKind::TransportError => Self::TransportError,
        }
    }
}

/// Classification and detail of a case that never reached assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFailure {
    /// Failure classification.
    pub kind: CaseFailureKind,
    /// Diagnostic detail.
    pub detail: String,
}

impl CaseFailure {
    /// Creates a configuration failure.
    #[must_use]
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self {
            kind: CaseFailureKind::Configuration,
            detail: detail.into(),
        }
    }
}

impl From<&TransportFailure> for CaseFailure {
    fn from(failure: &TransportFailure) -> Self {
        Self {
            kind: failure.kind.into(),
            detail: failure.detail.clone(),
        }
    }
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Method used.
    pub method: HttpMethod,
    /// Resolved URL, or the raw path when it could not be resolved.
    pub url: String,
    /// Evaluated assertions in declaration order.
    pub outcomes: Vec<AssertionOutcome>,
    /// Time spent on the case.
    #[serde(rename = "elapsed_ms", with = "crate::serde_millis")]
    pub elapsed: Duration,
    /// True iff every outcome passed.
    pub passed: bool,
    /// Set when the exchange never produced a response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<CaseFailure>,
}

impl CaseReport {
    /// Creates a case report; `passed` is derived from the outcomes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
        outcomes: Vec<AssertionOutcome>,
        elapsed: Duration,
    ) -> Self {
        let passed = !outcomes.is_empty() && outcomes.iter().all(|o| o.passed);
        Self {
            name: name.into(),
            method,
            url: url.into(),
            outcomes,
            elapsed,
            passed,
            failure: None,
        }
    }

    /// Attaches a failure classification (builder pattern).
    #[must_use]
    pub fn with_failure(mut self, failure: CaseFailure) -> Self {
        self.failure = Some(failure);
        self.passed = false;
        self
    }

    /// Returns the failed outcomes.
    pub fn failed_outcomes(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Ordered results of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// Suite that was run.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Case results in declaration order.
    pub cases: Vec<CaseReport>,
    /// Number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
}

impl TestReport {
    /// Create a new report; counters are derived from the cases.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        cases: Vec<CaseReport>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.passed).count();

        Self {
            suite_name: suite_name.into(),
            started_at,
            finished_at,
            cases,
            total,
            passed,
            failed: total - passed,
        }
    }

    /// True iff every case's every outcome passed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }

    /// Looks up a case result by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Total wall time of the run.
    #[must_use]
    pub fn duration(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    /// Returns a copy with every time field zeroed, for comparing runs.
    #[must_use]
    pub fn without_timings(&self) -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let mut normalized = self.clone();
        normalized.started_at = epoch;
        normalized.finished_at = epoch;
        for case in &mut normalized.cases {
            case.elapsed = Duration::ZERO;
        }
        normalized
    }
}
