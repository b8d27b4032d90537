//! Result of loading a collection.
//!
//! A paginated fetch can stop after some pages have already been read.
//! [`FetchOutcome`] keeps that case apart from both success and outright
//! failure so the caller decides what to commit and what to tell the user.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a fetch stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureCause {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport {
        /// Transport error description.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("malformed response: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },

    /// No API key is set.
    #[error("no API key set")]
    MissingCredential,

    /// A workspace-scoped collection was requested with no workspace selected.
    #[error("no workspace selected")]
    NoWorkspaceSelected,
}

/// A failure together with where in the traversal it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{cause}")]
pub struct FetchFailure {
    /// What went wrong.
    pub cause: FailureCause,
    /// Offset of the page being requested, for paginated fetches.
    pub offset: Option<u64>,
}

impl FetchFailure {
    /// Creates a failure that is not tied to a page.
    #[must_use]
    pub const fn new(cause: FailureCause) -> Self {
        Self {
            cause,
            offset: None,
        }
    }

    /// Creates a failure at the given page offset.
    #[must_use]
    pub const fn at_offset(cause: FailureCause, offset: u64) -> Self {
        Self {
            cause,
            offset: Some(offset),
        }
    }
}

/// Coarse classification of a [`FetchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Every page was read.
    Complete,
    /// Some pages were read before a failure.
    Partial,
    /// Nothing was read.
    Failed,
}

/// Items loaded by a fetch and whether the load finished.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The whole collection was read.
    Complete(Vec<T>),

    /// At least one page was read before the fetch stopped.
    Partial {
        /// Items accumulated before the failure.
        items: Vec<T>,
        /// What stopped the fetch.
        failure: FetchFailure,
    },

    /// The first request already failed.
    Failed(FetchFailure),
}

impl<T> FetchOutcome<T> {
    /// Builds the outcome of a traversal that stopped on `failure` after
    /// `pages_read` successful pages.
    #[must_use]
    pub fn interrupted(items: Vec<T>, pages_read: u64, failure: FetchFailure) -> Self {
        if pages_read == 0 {
            Self::Failed(failure)
        } else {
            Self::Partial { items, failure }
        }
    }

    /// Returns the outcome classification.
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Complete(_) => OutcomeKind::Complete,
            Self::Partial { .. } => OutcomeKind::Partial,
            Self::Failed(_) => OutcomeKind::Failed,
        }
    }

    /// Returns true if the whole collection was read.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Items read so far.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Complete(items) | Self::Partial { items, .. } => items,
            Self::Failed(_) => &[],
        }
    }

    /// The failure, unless the fetch completed.
    #[must_use]
    pub const fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { failure, .. } | Self::Failed(failure) => Some(failure),
        }
    }

    /// Splits the outcome into its items and optional failure.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<FetchFailure>) {
        match self {
            Self::Complete(items) => (items, None),
            Self::Partial { items, failure } => (items, Some(failure)),
            Self::Failed(failure) => (Vec::new(), Some(failure)),
        }
    }
}
