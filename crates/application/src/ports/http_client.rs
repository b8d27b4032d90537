//! HTTP transport port

use async_trait::async_trait;
use splitdeck_domain::{ApiRequest, ApiResponse};
use thiserror::Error;

/// Transport-level failures: the request produced no HTTP response.
///
/// Non-2xx responses are not errors at this layer; they are returned as
/// an [`ApiResponse`] for the caller to inspect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS resolution failed.
    #[error("Could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The operating system or a proxy timed the request out.
    #[error("Request timed out")]
    Timeout,

    /// The redirect limit was reached.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for issuing authenticated GET requests to the Admin API.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Implementations resolve `request.path` against their base URL, append
/// the query, and send `Accept: application/json` and
/// `Authorization: Bearer {key}`. They do not retry.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only if no HTTP response was received.
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse, HttpClientError>;
}
