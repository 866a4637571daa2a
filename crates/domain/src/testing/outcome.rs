//! Evaluated assertions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an assertion looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    /// The status code (also used for exchanges that never completed).
    Status,
    /// A response header.
    Header,
    /// A body fragment.
    BodyFragment,
}

impl AssertionKind {
    /// Returns the kind name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Header => "header",
            Self::BodyFragment => "body_fragment",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating one expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionOutcome {
    /// Assertion kind.
    pub kind: AssertionKind,
    /// What was checked: `status`, a header name, or `body`.
    pub subject: String,
    /// Expected value as declared, prefixed by the match mode where one applies.
    pub expected: String,
    /// Actual value found; `None` when absent.
    pub actual: Option<String>,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Diagnostic message if failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssertionOutcome {
    /// Marker rendered in place of a missing actual value.
    pub const ABSENT: &'static str = "<absent>";

    /// Create a passed outcome.
    #[must_use]
    pub fn pass(
        kind: AssertionKind,
        subject: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            expected: expected.into(),
            actual: Some(actual.into()),
            passed: true,
            message: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn fail(
        kind: AssertionKind,
        subject: impl Into<String>,
        expected: impl Into<String>,
        actual: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            expected: expected.into(),
            actual,
            passed: false,
            message: Some(message.into()),
        }
    }

    /// Returns the actual value, or the absent marker.
    #[must_use]
    pub fn actual_display(&self) -> &str {
        self.actual.as_deref().unwrap_or(Self::ABSENT)
    }
}
