//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest library.
//! It performs every exchange the harness makes with the system under test.

use std::error::Error as _;
use std::io;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use testlang_application::{ApplicationError, ApplicationResult, HttpTransport};
use testlang_domain::{
    CapturedResponse, Exchange, HarnessConfig, Headers, HttpMethod, RequestSpec, TransportFailure,
};

/// HTTP transport implementation using reqwest.
///
/// Wraps one `reqwest::Client`, whose connection pool is shared by every
/// exchange and safe to use from concurrent tasks.
///
/// Behavior:
/// - Connection timeout: from the harness configuration (5 seconds by default)
/// - Total timeout: per request, from `RequestSpec::timeout`
/// - Redirects: never followed; a 3xx is captured as the response
/// - Retries: none
/// - User-Agent: "TestLang/<version>"
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport using the connection timeout of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: &HarnessConfig) -> ApplicationResult<Self> {
        Self::with_connect_timeout(config.connect_timeout())
    }

    /// Creates a transport with an explicit connection timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_connect_timeout(connect_timeout: Duration) -> ApplicationResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("TestLang/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApplicationError::TransportSetup(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Classifies a reqwest error.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportFailure {
        let detail = describe(error);

        if error.is_timeout() {
            return TransportFailure::timeout(format!("no response within {timeout:?}: {detail}"));
        }

        if error.is_connect() && is_connection_refused(error) {
            return TransportFailure::connection_refused(detail);
        }

        TransportFailure::other(detail)
    }

    async fn send(&self, request: &RequestSpec) -> Exchange {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), &request.url)
            .timeout(request.timeout);

        for header in request.headers.iter() {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, request.timeout))?;

        let status = response.status().as_u16();

        // Duplicate header names keep their first value.
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.append_if_absent(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, request.timeout))?
            .to_vec();

        Ok(CapturedResponse::new(status, headers, body, start.elapsed()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &RequestSpec) -> Exchange {
        self.send(request).await
    }
}

/// Renders an error with its whole source chain, since reqwest's own
/// message omits the underlying cause.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_connection_refused(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io| io.kind() == io::ErrorKind::ConnectionRefused)
        {
            return true;
        }
        source = cause.source();
    }
    describe(error).to_lowercase().contains("refused")
}

#[cfg(test)]
mod tests {
    use super::*;
    use testlang_domain::TransportFailureKind;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Put),
            Method::PUT
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(&HarnessConfig::new("http://localhost:8080"));
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_url_is_transport_error() {
        let transport = ReqwestTransport::with_connect_timeout(Duration::from_secs(1))
            .expect("client should build");
        let request = RequestSpec::new(HttpMethod::Get, "not a url", Duration::from_secs(1));

        let exchange = transport.execute(&request).await;
        assert!(matches!(
            exchange,
            Err(TransportFailure {
                kind: TransportFailureKind::TransportError,
                ..
            })
        ));
    }
}
