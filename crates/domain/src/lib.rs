//! TestLang Domain - Core types
//!
//! This crate defines the domain model for the TestLang contract test
//! harness: declarative cases, request descriptors, captured responses,
//! assertion outcomes, and reports.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
mod serde_millis;
pub mod suite;
pub mod testing;

pub use config::HarnessConfig;
pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, RequestSpec};
pub use response::{CapturedResponse, Exchange, StatusCode, TransportFailure, TransportFailureKind};
pub use suite::TestSuite;
pub use testing::{
    AssertionKind, AssertionOutcome, CaseFailure, CaseFailureKind, CaseReport, Expectations,
    HeaderExpectation, MatchMode, TestCase, TestReport,
};
