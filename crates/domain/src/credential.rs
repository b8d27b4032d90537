//! Admin API credential.

use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Opaque bearer token for the Admin API.
///
/// Held in memory only: the type implements neither `Serialize` nor a
/// revealing `Debug`, so it cannot leak into exported files or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a token, rejecting empty or whitespace-only values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCredential` for a blank token.
    pub fn new(token: impl Into<String>) -> DomainResult<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCredential);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the `Authorization` header value for this key.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let key = ApiKey::new("secret-token").unwrap();
        assert_eq!(key.bearer_header(), "Bearer secret-token");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(ApiKey::new(""), Err(DomainError::EmptyCredential));
        assert_eq!(ApiKey::new(" \t"), Err(DomainError::EmptyCredential));
    }

    #[test]
    fn test_debug_and_display_are_redacted() {
        let key = ApiKey::new("secret-token").unwrap();
        assert!(!format!("{key:?}").contains("secret"));
        assert!(!key.to_string().contains("secret"));
    }
}
