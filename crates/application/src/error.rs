//! Application error types

use splitdeck_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
///
/// Fetch failures are not represented here: they are reported as
/// `FetchOutcome` values. These errors cover wiring problems that keep
/// the client from starting at all.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The HTTP transport could not be created.
    #[error("HTTP error: {0}")]
    Transport(#[from] HttpClientError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
