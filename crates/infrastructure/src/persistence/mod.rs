//! File-based persistence for suites and reports.

mod report_file;
mod suite_file;

pub use report_file::write_report;
pub use suite_file::{SuiteFormat, SuiteLoadError, load_suite, read_suite};
