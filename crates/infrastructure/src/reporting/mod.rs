//! Report rendering.
//!
//! A finished [`TestReport`] renders either as human-readable text or as
//! deterministic JSON.

mod text;

pub use text::render_text;

use testlang_domain::TestReport;

use crate::serialization::{SerializationError, to_json_stable};

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One line per case plus failure details and a summary.
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &TestReport, format: ReportFormat) -> Result<String, SerializationError> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => to_json_stable(report),
    }
}
