//! Assertion Engine
//!
//! Evaluates a case's expectations against one exchange and produces the
//! ordered list of outcomes.

use regex::Regex;
use testlang_domain::{
    AssertionKind, AssertionOutcome, CapturedResponse, Exchange, HeaderExpectation, MatchMode,
    TestCase, TransportFailure,
};

/// Longest body excerpt recorded as the actual value of a failed fragment check.
const BODY_PREVIEW_CHARS: usize = 100;

/// Stateless evaluator for case expectations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionEngine;

impl AssertionEngine {
    /// Create a new engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates every expectation of `case` against `exchange`.
    ///
    /// A transport failure yields a single failed `status` outcome and
    /// nothing else. Otherwise the status, each header expectation, and
    /// each body fragment are checked in that order, and every one is
    /// recorded even after an earlier failure.
    #[must_use]
    pub fn evaluate(&self, case: &TestCase, exchange: &Exchange) -> Vec<AssertionOutcome> {
        match exchange {
            Ok(response) => self.evaluate_response(case, response),
            Err(failure) => vec![self.transport_failure(case, failure)],
        }
    }

    fn evaluate_response(
        &self,
        case: &TestCase,
        response: &CapturedResponse,
    ) -> Vec<AssertionOutcome> {
        let mut outcomes = Vec::with_capacity(case.assertion_count());

        outcomes.push(self.check_status(case.expect.status, response));
        for expectation in &case.expect.headers {
            outcomes.push(self.check_header(expectation, response));
        }
        for fragment in &case.expect.body_contains {
            outcomes.push(self.check_body_fragment(fragment, response));
        }

        outcomes
    }

    fn transport_failure(&self, case: &TestCase, failure: &TransportFailure) -> AssertionOutcome {
        AssertionOutcome::fail(
            AssertionKind::Status,
            "status",
            case.expect.status.to_string(),
            Some(failure.kind.to_string()),
            format!("No response: {failure}"),
        )
    }

    fn check_status(&self, expected: u16, response: &CapturedResponse) -> AssertionOutcome {
        let actual = response.status_code();
        if actual == expected {
            AssertionOutcome::pass(
                AssertionKind::Status,
                "status",
                expected.to_string(),
                actual.to_string(),
            )
        } else {
            AssertionOutcome::fail(
                AssertionKind::Status,
                "status",
                expected.to_string(),
                Some(actual.to_string()),
                format!("Expected status {expected}, got {}", response.status),
            )
        }
    }

    fn check_header(
        &self,
        expectation: &HeaderExpectation,
        response: &CapturedResponse,
    ) -> AssertionOutcome {
        let name = expectation.name.as_str();
        let expected = format!("{} {}", expectation.mode.symbol(), expectation.value);

        let Some(actual) = response.header(name) else {
            return AssertionOutcome::fail(
                AssertionKind::Header,
                name,
                expected,
                None,
                format!("Header '{name}' not found"),
            );
        };

        let verdict = match expectation.mode {
            MatchMode::Exact => Ok(actual == expectation.value),
            MatchMode::Contains => Ok(actual.contains(&expectation.value)),
            MatchMode::Matches => Regex::new(&expectation.value)
                .map(|regex| regex.is_match(actual))
                .map_err(|e| format!("Invalid regex pattern '{}': {e}", expectation.value)),
        };

        match verdict {
            Ok(true) => AssertionOutcome::pass(AssertionKind::Header, name, expected, actual),
            Ok(false) => AssertionOutcome::fail(
                AssertionKind::Header,
                name,
                expected,
                Some(actual.to_string()),
                format!("{} failed: got '{actual}'", expectation.description()),
            ),
            Err(message) => AssertionOutcome::fail(
                AssertionKind::Header,
                name,
                expected,
                Some(actual.to_string()),
                message,
            ),
        }
    }

    fn check_body_fragment(&self, fragment: &str, response: &CapturedResponse) -> AssertionOutcome {
        if response.body.contains(fragment) {
            AssertionOutcome::pass(AssertionKind::BodyFragment, "body", fragment, fragment)
        } else {
            AssertionOutcome::fail(
                AssertionKind::BodyFragment,
                "body",
                fragment,
                Some(response.body_preview(BODY_PREVIEW_CHARS)),
                format!("Body does not contain '{fragment}'"),
            )
        }
    }
}
