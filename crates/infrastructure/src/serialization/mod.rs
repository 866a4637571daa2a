//! Deterministic serialization for suite files and reports.
//!
//! JSON output uses 2-space indentation and a trailing newline, so two
//! reports of the same run diff cleanly.

mod json;

pub use json::*;
