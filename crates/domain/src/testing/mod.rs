//! Contract cases, assertion outcomes, and run reports.

mod case;
mod outcome;
mod report;

pub use case::{Expectations, HeaderExpectation, MatchMode, TestCase};
pub use outcome::{AssertionKind, AssertionOutcome};
pub use report::{CaseFailure, CaseFailureKind, CaseReport, TestReport};
