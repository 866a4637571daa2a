//! TestLang Application - Contract execution core
//!
//! This crate defines the application layer with:
//! - Port traits (the HTTP transport boundary)
//! - The request builder and assertion engine
//! - The run-suite use case orchestrating them
//! - Application-level error handling

pub mod assertion_engine;
pub mod error;
pub mod ports;
pub mod request_builder;
pub mod use_cases;

pub use assertion_engine::AssertionEngine;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::HttpTransport;
pub use request_builder::RequestBuilder;
pub use use_cases::TestRunner;
