//! Outbound request description.

use crate::credential::ApiKey;
use crate::page::PageRequest;

/// An authenticated GET against the Admin API.
///
/// The transport resolves `path` against its configured base URL, appends
/// `query`, and sends `Accept: application/json` plus the bearer header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path relative to the API base.
    pub path: String,
    /// Query parameters in send order.
    pub query: Vec<(String, String)>,
    /// Credential for the `Authorization` header.
    pub api_key: ApiKey,
}

impl ApiRequest {
    /// Creates a request without query parameters.
    #[must_use]
    pub fn get(path: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            api_key,
        }
    }

    /// Adds the `limit`/`offset` parameters of a page.
    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.query.extend(page.query());
        self
    }

    /// Looks up a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
