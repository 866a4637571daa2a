//! Use cases (application services)
//!
//! Each use case orchestrates domain logic and port interactions.

mod run_suite;

pub use run_suite::TestRunner;
