//! Application error types

use thiserror::Error;
use testlang_domain::DomainError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A case or the harness configuration is malformed.
    #[error("configuration error: {0}")]
    Configuration(#[from] DomainError),

    /// The transport could not be set up.
    #[error("transport setup failed: {0}")]
    TransportSetup(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
