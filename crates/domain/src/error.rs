//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The API credential is empty.
    #[error("API key must not be empty")]
    EmptyCredential,

    /// The configured page size cannot be used for pagination.
    #[error("invalid page size: {0} (must be between 1 and {max})", max = crate::page::MAX_PAGE_SIZE)]
    InvalidPageSize(u32),

    /// A commit policy name was not recognised.
    #[error("unknown commit policy: {0}")]
    UnknownCommitPolicy(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
