//! TestLang Infrastructure - Adapters and implementations
//!
//! This crate provides the concrete HTTP transport behind the application
//! layer's port, plus suite loading and report output.

pub mod adapters;
pub mod persistence;
pub mod reporting;
pub mod serialization;

pub use adapters::ReqwestTransport;
pub use persistence::{SuiteFormat, SuiteLoadError, load_suite, read_suite, write_report};
pub use reporting::{ReportFormat, render, render_text};
pub use serialization::{SerializationError, from_json, to_json_stable};
