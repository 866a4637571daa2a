//! End-to-end contract runs against an in-process user API.
//!
//! The fixture serves the login and user endpoints under `/api` on an
//! ephemeral port; every case goes through the real reqwest transport.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

use testlang_application::TestRunner;
use testlang_domain::{
    AssertionKind, CaseFailureKind, HarnessConfig, HeaderExpectation, HttpMethod, TestCase,
    TestSuite,
};
use testlang_infrastructure::ReqwestTransport;

const JSON: &str = "application/json";

async fn login(headers: HeaderMap, body: String) -> impl IntoResponse {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("json"));
    if !is_json || !body.contains("\"username\"") {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            [(header::CONTENT_TYPE, JSON)],
            "{}".to_string(),
        );
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON)],
        r#"{ "token": "abcd1234" }"#.to_string(),
    )
}

async fn get_user(Path(id): Path<u64>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, JSON)],
        format!(r#"{{ "id": {id}, "username": "testuser", "role": "USER" }}"#),
    )
}

async fn update_user(Path(id): Path<u64>) -> impl IntoResponse {
    (
        [("content-type", JSON), ("x-app", "TestLangDemo")],
        format!(r#"{{ "updated": true, "id": {id}, "role": "ADMIN" }}"#),
    )
}

async fn delete_user(Path(id): Path<u64>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, JSON)],
        format!(r#"{{ "deleted": true, "id": {id} }}"#),
    )
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(2)).await;
    ([(header::CONTENT_TYPE, JSON)], "{}")
}

async fn decorated() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert("x-name", HeaderValue::from_bytes("café".as_bytes()).unwrap());
    headers.append("x-dup", HeaderValue::from_static("first"));
    headers.append("x-dup", HeaderValue::from_static("second"));
    (headers, "{}")
}

async fn moved() -> Redirect {
    Redirect::temporary("/api/users/42")
}

/// Serves the fixture API and returns its base URL.
async fn spawn_fixture() -> String {
    let app = Router::new()
        .route("/api/login", post(login))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/slow", get(slow))
        .route("/api/decorated", get(decorated))
        .route("/api/moved", get(moved));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

/// Returns a base URL whose port has no listener.
async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

fn user_api_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("Login", HttpMethod::Post, "/login")
            .with_body(r#"{"username":"admin","password":"1234"}"#)
            .expect_status(200)
            .expect_header(HeaderExpectation::contains("Content-Type", "json"))
            .expect_body_fragment(r#""token":"#),
        TestCase::new("GetUser", HttpMethod::Get, "/users/42")
            .expect_status(200)
            .expect_body_fragment(r#""id": 42"#),
        TestCase::new("UpdateUser", HttpMethod::Put, "/users/42")
            .with_header("Content-Type", JSON)
            .with_body(r#"{"role":"ADMIN"}"#)
            .expect_status(200)
            .expect_header(HeaderExpectation::exact("X-App", "TestLangDemo"))
            .expect_header(HeaderExpectation::contains("Content-Type", "json"))
            .expect_body_fragment(r#""updated": true"#)
            .expect_body_fragment(r#""role": "ADMIN""#),
        TestCase::new("DeleteUser", HttpMethod::Delete, "/users/42")
            .expect_status(200)
            .expect_header(HeaderExpectation::contains("Content-Type", "json"))
            .expect_body_fragment(r#""deleted": true"#),
    ]
}

fn user_api_suite(base_url: &str) -> TestSuite {
    let config = HarnessConfig::new(base_url).with_default_header("Content-Type", JSON);
    user_api_cases()
        .into_iter()
        .fold(TestSuite::new("User API", config), TestSuite::with_case)
}

async fn run(suite: &TestSuite) -> testlang_domain::TestReport {
    let transport = Arc::new(ReqwestTransport::new(&suite.config).unwrap());
    TestRunner::run_suite(transport, suite).await.unwrap()
}

#[tokio::test]
async fn test_user_api_contract_passes() {
    let base_url = spawn_fixture().await;
    let report = run(&user_api_suite(&base_url)).await;

    for case in &report.cases {
        assert!(case.passed, "case {} failed: {:?}", case.name, case.outcomes);
    }
    assert!(report.success());
    assert_eq!((report.total, report.passed, report.failed), (4, 4, 0));
    assert_eq!(
        report.cases.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Login", "GetUser", "UpdateUser", "DeleteUser"]
    );
    assert_eq!(
        report.case("GetUser").unwrap().url,
        format!("{base_url}/users/42")
    );
    assert_eq!(report.case("UpdateUser").unwrap().outcomes.len(), 5);
}

#[tokio::test]
async fn test_body_fragment_spacing_is_significant() {
    let base_url = spawn_fixture().await;
    let suite = TestSuite::new("Spacing", HarnessConfig::new(&base_url)).with_case(
        TestCase::new("CompactId", HttpMethod::Get, "/users/42")
            .expect_body_fragment(r#""id":42"#),
    );

    let report = run(&suite).await;
    let case = report.case("CompactId").unwrap();

    assert!(!case.passed);
    assert!(case.outcomes[0].passed);
    assert_eq!(case.outcomes[1].kind, AssertionKind::BodyFragment);
    assert_eq!(
        case.outcomes[1].actual.as_deref(),
        Some(r#"{ "id": 42, "username": "testuser", "role": "USER" }"#)
    );
}

#[tokio::test]
async fn test_unexpected_status_is_recorded() {
    let base_url = spawn_fixture().await;
    let suite = TestSuite::new("Missing", HarnessConfig::new(&base_url)).with_case(
        TestCase::new("NoSuchRoute", HttpMethod::Get, "/orders/1")
            .expect_header(HeaderExpectation::contains("Content-Type", "json")),
    );

    let report = run(&suite).await;
    let case = report.case("NoSuchRoute").unwrap();

    assert!(!case.passed);
    assert_eq!(case.failure, None);
    assert_eq!(case.outcomes.len(), 2);
    assert_eq!(case.outcomes[0].actual.as_deref(), Some("404"));
    assert!(!case.outcomes[1].passed);
}

#[tokio::test]
async fn test_connection_refused_does_not_stop_run() {
    let base_url = closed_base_url().await;
    let report = run(&user_api_suite(&base_url)).await;

    assert_eq!(report.total, 4);
    assert_eq!(report.failed, 4);
    for case in &report.cases {
        assert_eq!(case.outcomes.len(), 1);
        assert_eq!(case.outcomes[0].kind, AssertionKind::Status);
        assert!(!case.outcomes[0].passed);
        assert_eq!(
            case.failure.as_ref().map(|f| f.kind),
            Some(CaseFailureKind::ConnectionRefused)
        );
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let base_url = spawn_fixture().await;
    let suite = TestSuite::new("Slow", HarnessConfig::new(&base_url))
        .with_case(TestCase::new("Slow", HttpMethod::Get, "/slow").with_timeout_ms(200))
        .with_case(TestCase::new("GetUser", HttpMethod::Get, "/users/42"));

    let report = run(&suite).await;

    let slow = report.case("Slow").unwrap();
    assert_eq!(
        slow.failure.as_ref().map(|f| f.kind),
        Some(CaseFailureKind::Timeout)
    );
    assert_eq!(slow.outcomes[0].actual.as_deref(), Some("Timeout"));
    assert!(report.case("GetUser").unwrap().passed);
}

#[tokio::test]
async fn test_malformed_path_fails_only_its_case() {
    let base_url = spawn_fixture().await;
    let suite = user_api_suite(&base_url)
        .with_case(TestCase::new("NoSlash", HttpMethod::Get, "users/42"));

    let report = run(&suite).await;

    assert_eq!((report.passed, report.failed), (4, 1));
    let bad = report.case("NoSlash").unwrap();
    assert_eq!(
        bad.failure.as_ref().map(|f| f.kind),
        Some(CaseFailureKind::Configuration)
    );
    assert_eq!(bad.outcomes[0].actual.as_deref(), Some("ConfigurationError"));
}

#[tokio::test]
async fn test_concurrent_run_keeps_declaration_order() {
    let base_url = spawn_fixture().await;
    let mut suite = user_api_suite(&base_url);
    suite.config.concurrency = 4;

    let report = run(&suite).await;

    assert!(report.success());
    assert_eq!(
        report.cases.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Login", "GetUser", "UpdateUser", "DeleteUser"]
    );
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let base_url = spawn_fixture().await;
    let suite = user_api_suite(&base_url);

    let first = run(&suite).await;
    let second = run(&suite).await;

    assert_eq!(first.without_timings(), second.without_timings());
}

#[tokio::test]
async fn test_utf8_header_value_is_captured() {
    let base_url = spawn_fixture().await;
    let suite = TestSuite::new("Headers", HarnessConfig::new(&base_url))
        .with_case(
            TestCase::new("Exact", HttpMethod::Get, "/decorated")
                .expect_header(HeaderExpectation::exact("X-Name", "café")),
        )
        .with_case(
            TestCase::new("Placeholder", HttpMethod::Get, "/decorated")
                .expect_header(HeaderExpectation::exact("X-Name", "<binary>")),
        );

    let report = run(&suite).await;

    let exact = report.case("Exact").unwrap();
    assert!(exact.passed, "outcomes: {:?}", exact.outcomes);
    assert_eq!(exact.outcomes[1].actual.as_deref(), Some("café"));

    let placeholder = report.case("Placeholder").unwrap();
    assert!(!placeholder.passed);
    assert_eq!(placeholder.outcomes[1].actual.as_deref(), Some("café"));
}

#[tokio::test]
async fn test_duplicate_response_header_keeps_first_value() {
    let base_url = spawn_fixture().await;
    let suite = TestSuite::new("Headers", HarnessConfig::new(&base_url)).with_case(
        TestCase::new("Dup", HttpMethod::Get, "/decorated")
            .expect_header(HeaderExpectation::exact("X-Dup", "first")),
    );

    let report = run(&suite).await;
    let case = report.case("Dup").unwrap();

    assert!(case.passed, "outcomes: {:?}", case.outcomes);
    assert_eq!(case.outcomes[1].actual.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let base_url = spawn_fixture().await;
    let suite = TestSuite::new("Redirects", HarnessConfig::new(&base_url)).with_case(
        TestCase::new("Moved", HttpMethod::Get, "/moved")
            .expect_status(307)
            .expect_header(HeaderExpectation::exact("Location", "/api/users/42")),
    );

    let report = run(&suite).await;
    let case = report.case("Moved").unwrap();

    assert!(case.passed, "outcomes: {:?}", case.outcomes);
    assert_eq!(case.outcomes[0].actual.as_deref(), Some("307"));
}
