//! Identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Server-assigned identifier of a workspace.
///
/// The Admin API uses opaque string ids. They are interpolated into
/// endpoint paths, so an id must be one non-empty path segment: no
/// separators, no percent escapes, and not `.` or `..`. Deserialized ids
/// go through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Creates a workspace id, rejecting anything that is not a single
    /// path segment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if the id cannot be used
    /// in an endpoint path.
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty()
            || matches!(trimmed, "." | "..")
            || trimmed.contains(['/', '\\', '?', '#', '%'])
        {
            return Err(DomainError::InvalidIdentifier(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for WorkspaceId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for WorkspaceId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkspaceId> for String {
    fn from(id: WorkspaceId) -> Self {
        id.0
    }
}

/// Generates a new UUID v7 identifying one store action run.
///
/// UUID v7 includes timestamp information and is sortable, so runs
/// appear in start order in logs.
#[must_use]
pub fn generate_run_id() -> Uuid {
    Uuid::now_v7()
}
