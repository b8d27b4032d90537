//! Request URL building.

use splitdeck_domain::{DomainError, DomainResult};
use url::Url;

/// The configured API base every endpoint path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Parses an absolute http(s) base URL.
    ///
    /// A missing trailing slash is added so that relative paths extend the
    /// base instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` for unparsable or non-http(s) URLs.
    pub fn parse(base: &str) -> DomainResult<Self> {
        let mut url =
            Url::parse(base.trim()).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "base URL must use http or https: {base}"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Returns the base as a URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    /// Builds the full URL for `path` with `query` appended url-encoded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the path cannot be joined or the
    /// query cannot be encoded.
    pub fn make_url(&self, path: &str, query: &[(String, String)]) -> DomainResult<Url> {
        let mut url = self
            .0
            .join(path.trim_start_matches('/'))
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {path}")))?;
        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| DomainError::InvalidUrl(e.to_string()))?;
            url.set_query(Some(&encoded));
        }
        Ok(url)
    }
}
