//! Plain-text report rendering.

use std::fmt::Write as _;

use testlang_domain::{CaseReport, TestReport};

/// Renders a report as plain text.
///
/// ```text
/// Suite: User API
/// PASS Login POST http://localhost:8080/api/login (12 ms)
/// FAIL GetUser GET http://localhost:8080/api/users/42 (3 ms)
///     [status] status: expected 200, actual 404
///         Expected status 200, got 404 Not Found
///
/// 2 cases: 1 passed, 1 failed (15 ms)
/// ```
#[must_use]
pub fn render_text(report: &TestReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Suite: {}", report.suite_name);

    for case in &report.cases {
        write_case(&mut out, case);
    }

    let _ = writeln!(
        out,
        "\n{} cases: {} passed, {} failed ({} ms)",
        report.total,
        report.passed,
        report.failed,
        report.duration().as_millis()
    );
    out
}

fn write_case(out: &mut String, case: &CaseReport) {
    let verdict = if case.passed { "PASS" } else { "FAIL" };
    let _ = writeln!(
        out,
        "{verdict} {} {} {} ({} ms)",
        case.name,
        case.method,
        case.url,
        case.elapsed.as_millis()
    );

    if let Some(failure) = &case.failure {
        let _ = writeln!(out, "    {}: {}", failure.kind, failure.detail);
    }

    for outcome in case.failed_outcomes() {
        let _ = writeln!(
            out,
            "    [{}] {}: expected {}, actual {}",
            outcome.kind.as_str(),
            outcome.subject,
            outcome.expected,
            outcome.actual_display()
        );
        if let Some(message) = &outcome.message {
            let _ = writeln!(out, "        {message}");
        }
    }
}
