//! HTTP transport port

use async_trait::async_trait;
use testlang_domain::{Exchange, RequestSpec};

/// Port for performing one HTTP exchange.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
///
/// Implementations perform exactly one request/response exchange per call,
/// never retry, and never return an error out of band: every failure is
/// classified into the `Err` side of [`Exchange`]. A shared implementation
/// must be safe to call from concurrent tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request, bounded by `request.timeout`, and captures the
    /// response.
    async fn execute(&self, request: &RequestSpec) -> Exchange;
}
