//! Transport failure classification

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CapturedResponse;

/// Why an exchange did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFailureKind {
    /// The peer actively refused the connection.
    ConnectionRefused,
    /// Connection establishment or the whole exchange ran out of time.
    Timeout,
    /// Any other failure to complete the exchange.
    TransportError,
}

impl TransportFailureKind {
    /// Returns the classification name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionRefused => "ConnectionRefused",
            Self::Timeout => "Timeout",
            Self::TransportError => "TransportError",
        }
    }
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed exchange: the classification plus diagnostic detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportFailure {
    /// Failure classification.
    pub kind: TransportFailureKind,
    /// Human-readable detail from the underlying stack.
    pub detail: String,
}

impl TransportFailure {
    /// Creates a failure of the given kind.
    #[must_use]
    pub fn new(kind: TransportFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Creates a `ConnectionRefused` failure.
    #[must_use]
    pub fn connection_refused(detail: impl Into<String>) -> Self {
        Self::new(TransportFailureKind::ConnectionRefused, detail)
    }

    /// Creates a `Timeout` failure.
    #[must_use]
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(TransportFailureKind::Timeout, detail)
    }

    /// Creates a catch-all `TransportError` failure.
    #[must_use]
    pub fn other(detail: impl Into<String>) -> Self {
        Self::new(TransportFailureKind::TransportError, detail)
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

impl std::error::Error for TransportFailure {}

/// Outcome of one transport call: a captured response xor a failure.
pub type Exchange = Result<CapturedResponse, TransportFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        let failure = TransportFailure::connection_refused("127.0.0.1:9");
        assert_eq!(failure.to_string(), "ConnectionRefused: 127.0.0.1:9");
        assert_eq!(TransportFailure::timeout("10s").kind.as_str(), "Timeout");
    }
}
