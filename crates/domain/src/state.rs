//! Load state of a store collection.
//!
//! This module defines the state machine a collection goes through while
//! it is fetched, so a front end can show feedback at each stage:
//! - `Idle`: never fetched
//! - `Loading`: a fetch is in flight
//! - `Loaded`: the collection was committed, possibly incomplete
//! - `Error`: the last fetch was not committed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::outcome::{FailureCause, FetchFailure};

/// Current state of one collection in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing has been fetched yet.
    #[default]
    Idle,

    /// A fetch is in progress.
    Loading {
        /// Run that started the fetch.
        run_id: Uuid,
        /// When the fetch started (for elapsed time display).
        /// Skipped in serialization as Instant is not serializable.
        #[serde(skip)]
        started_at: Option<std::time::Instant>,
    },

    /// The collection was committed.
    Loaded {
        /// Number of items committed.
        count: usize,
        /// False when a partial read was committed.
        complete: bool,
        /// Commit time.
        at: DateTime<Utc>,
    },

    /// The last fetch failed and nothing was committed.
    Error {
        /// Human-readable error message.
        message: String,
        /// What stopped the fetch.
        cause: FailureCause,
        /// Page offset of the failure, for paginated collections.
        offset: Option<u64>,
        /// When the failure was recorded.
        at: DateTime<Utc>,
    },
}

impl LoadState {
    /// Creates a new Loading state with the current timestamp.
    #[must_use]
    pub fn loading(run_id: Uuid) -> Self {
        Self::Loading {
            run_id,
            started_at: Some(std::time::Instant::now()),
        }
    }

    /// Creates a Loaded state.
    #[must_use]
    pub const fn loaded(count: usize, complete: bool, at: DateTime<Utc>) -> Self {
        Self::Loaded {
            count,
            complete,
            at,
        }
    }

    /// Creates an Error state from a fetch failure.
    #[must_use]
    pub fn failed(failure: &FetchFailure, at: DateTime<Utc>) -> Self {
        Self::Error {
            message: failure.to_string(),
            cause: failure.cause.clone(),
            offset: failure.offset,
            at,
        }
    }

    /// Returns true if a fetch is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns true if the collection has been committed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Returns true if the last fetch failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns true if the committed collection is known to be truncated.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::Loaded {
                complete: false,
                ..
            }
        )
    }

    /// Returns the elapsed time if loading.
    #[must_use]
    pub fn elapsed(&self) -> Option<std::time::Duration> {
        match self {
            Self::Loading {
                started_at: Some(t),
                ..
            } => Some(t.elapsed()),
            _ => None,
        }
    }
}
