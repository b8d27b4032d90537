//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `ApiTransport` port using the reqwest library.
//! It handles all HTTP communication with the Admin API.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use splitdeck_application::ports::{ApiTransport, HttpClientError};
use splitdeck_domain::{ApiRequest, ApiResponse};

use crate::http::ApiBaseUrl;

const MAX_REDIRECTS: usize = 10;

/// Admin API transport backed by `reqwest::Client`.
///
/// No request timeout is configured; a request waits until the server
/// answers or the connection fails.
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: Client,
    base: ApiBaseUrl,
}

impl ReqwestApiClient {
    /// Creates a client for the given API base URL.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "splitdeck/{version}"
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn new(base_url: &str) -> Result<Self, HttpClientError> {
        let base =
            ApiBaseUrl::parse(base_url).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        let client = Client::builder()
            .user_agent(concat!("splitdeck/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, base })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base(&self) -> &ApiBaseUrl {
        &self.base
    }

    fn host_of(error: &reqwest::Error) -> String {
        error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout;
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: Self::host_of(error),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: Self::host_of(error),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl ApiTransport for ReqwestApiClient {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse, HttpClientError> {
        let url = self
            .base
            .make_url(&request.path, &request.query)
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, request.api_key.bearer_header())
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Body(e.to_string()))?
            .to_vec();

        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReqwestApiClient::new("https://api.split.io/internal/api/");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ReqwestApiClient::new("ftp://api.split.io/");
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_base_gets_trailing_slash() {
        let client = ReqwestApiClient::new("http://localhost:9000/internal/api")
            .expect("client should build");
        assert_eq!(client.base().as_url().path(), "/internal/api/");
    }
}
