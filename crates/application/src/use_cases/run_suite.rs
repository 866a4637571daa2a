//! Run Suite Use Case
//!
//! Orchestrates the request builder, the transport, and the assertion
//! engine over an ordered list of cases and assembles the report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use testlang_domain::{
    AssertionKind, AssertionOutcome, CaseFailure, CaseFailureKind, CaseReport, DomainError,
    Exchange, HarnessConfig, TestCase, TestReport, TestSuite, TransportFailure,
};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::assertion_engine::AssertionEngine;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;
use crate::request_builder::RequestBuilder;

/// A case waiting for its verdict.
enum Pending {
    /// The builder rejected the case; nothing was sent.
    Rejected(DomainError),
    /// The exchange was dispatched.
    Dispatched {
        url: String,
        handle: JoinHandle<(Exchange, Duration)>,
    },
}

/// Use case for running cases against a live system under test.
///
/// Cases are dispatched in declaration order with at most `concurrency`
/// exchanges in flight. One case's failure never stops the others, and the
/// report always lists cases in declaration order.
///
/// # Example
///
/// ```ignore
/// let transport = Arc::new(ReqwestTransport::new(&suite.config)?);
/// let runner = TestRunner::new(transport, &suite.config)?;
/// let report = runner.run(&suite.name, &suite.cases).await;
/// assert!(report.success());
/// ```
pub struct TestRunner<T: HttpTransport + 'static> {
    transport: Arc<T>,
    builder: RequestBuilder,
    engine: AssertionEngine,
    concurrency: usize,
}

impl<T: HttpTransport + 'static> TestRunner<T> {
    /// Creates a runner for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the harness configuration cannot run
    /// any case.
    pub fn new(transport: Arc<T>, config: &HarnessConfig) -> ApplicationResult<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            builder: RequestBuilder::new(config),
            engine: AssertionEngine::new(),
            concurrency: config.concurrency,
        })
    }

    /// Validates a whole suite and runs it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any case executes if the suite
    /// fails startup validation.
    pub async fn run_suite(transport: Arc<T>, suite: &TestSuite) -> ApplicationResult<TestReport> {
        suite.validate()?;
        let runner = Self::new(transport, &suite.config)?;
        Ok(runner.run(&suite.name, &suite.cases).await)
    }

    /// Runs the cases and returns the report.
    pub async fn run(&self, suite_name: &str, cases: &[TestCase]) -> TestReport {
        let started_at = Utc::now();
        info!(
            suite = suite_name,
            cases = cases.len(),
            concurrency = self.concurrency,
            "Starting contract run"
        );

        let pending = self.dispatch(cases).await;

        let mut reports = Vec::with_capacity(cases.len());
        for (case, pending) in cases.iter().zip(pending) {
            let report = self.settle(case, pending).await;
            if report.passed {
                info!(case = %report.name, elapsed = ?report.elapsed, "PASS");
            } else {
                info!(
                    case = %report.name,
                    elapsed = ?report.elapsed,
                    failed = report.failed_outcomes().count(),
                    "FAIL"
                );
            }
            reports.push(report);
        }

        let report = TestReport::new(suite_name, reports, started_at, Utc::now());
        info!(
            suite = suite_name,
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "Contract run finished"
        );
        report
    }

    /// Builds every request and spawns its exchange, waiting for a free slot
    /// before each spawn so dispatch follows declaration order.
    async fn dispatch(&self, cases: &[TestCase]) -> Vec<Pending> {
        let slots = Arc::new(Semaphore::new(self.concurrency));
        let mut pending = Vec::with_capacity(cases.len());

        for case in cases {
            let request = match self.builder.build(case) {
                Ok(request) => request,
                Err(err) => {
                    warn!(case = %case.name, error = %err, "Case rejected before dispatch");
                    pending.push(Pending::Rejected(err));
                    continue;
                }
            };

            debug!(
                case = %case.name,
                method = %request.method,
                url = %request.url,
                headers = ?request.headers.names().collect::<Vec<_>>(),
                timeout = ?request.timeout,
                "Dispatching request"
            );

            let permit = Arc::clone(&slots).acquire_owned().await.ok();
            let transport = Arc::clone(&self.transport);
            let url = request.url.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                let start = Instant::now();
                let exchange = transport.execute(&request).await;
                (exchange, start.elapsed())
            });

            pending.push(Pending::Dispatched { url, handle });
        }

        pending
    }

    async fn settle(&self, case: &TestCase, pending: Pending) -> CaseReport {
        match pending {
            Pending::Rejected(err) => self.rejected(case, &err),
            Pending::Dispatched { url, handle } => {
                let (exchange, elapsed) = handle.await.unwrap_or_else(|join_err| {
                    (
                        Err(TransportFailure::other(format!(
                            "exchange task failed: {join_err}"
                        ))),
                        Duration::ZERO,
                    )
                });
                self.evaluate(case, url, &exchange, elapsed)
            }
        }
    }

    fn evaluate(
        &self,
        case: &TestCase,
        url: String,
        exchange: &Exchange,
        elapsed: Duration,
    ) -> CaseReport {
        match exchange {
            Ok(response) => debug!(
                case = %case.name,
                status = response.status_code(),
                body_bytes = response.body.len(),
                "Response captured"
            ),
            Err(failure) => warn!(
                case = %case.name,
                kind = %failure.kind,
                detail = %failure.detail,
                "Exchange failed"
            ),
        }

        let outcomes = self.engine.evaluate(case, exchange);
        let report = CaseReport::new(&case.name, case.method, url, outcomes, elapsed);
        match exchange {
            Ok(_) => report,
            Err(failure) => report.with_failure(CaseFailure::from(failure)),
        }
    }

    fn rejected(&self, case: &TestCase, err: &DomainError) -> CaseReport {
        let outcome = AssertionOutcome::fail(
            AssertionKind::Status,
            "status",
            case.expect.status.to_string(),
            Some(CaseFailureKind::Configuration.to_string()),
            format!("Not sent: {err}"),
        );
        CaseReport::new(
            &case.name,
            case.method,
            &case.path,
            vec![outcome],
            Duration::ZERO,
        )
        .with_failure(CaseFailure::configuration(err.to_string()))
    }
}
