//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided base URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A case path does not start with `/`.
    #[error("invalid path '{0}': path must start with '/'")]
    InvalidPath(String),

    /// A required header name is invalid.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A body was declared for a method that never carries one.
    #[error("case '{case}': {method} requests cannot carry a body")]
    BodyNotAllowed {
        /// Name of the offending case.
        case: String,
        /// The method that rejected the body.
        method: String,
    },

    /// A header expectation pattern failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as declared.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// Two cases share the same name.
    #[error("duplicate case name: {0}")]
    DuplicateCase(String),

    /// A case name is empty.
    #[error("case name must not be empty")]
    EmptyCaseName,

    /// The suite declares no cases.
    #[error("suite '{0}' declares no cases")]
    EmptySuite(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
