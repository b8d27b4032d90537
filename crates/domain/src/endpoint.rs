//! Admin API endpoints.

use crate::id::WorkspaceId;
use crate::model::CollectionKind;

/// The resources this client reads, as paths relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEndpoint {
    /// `v2/workspaces` (paginated).
    Workspaces,
    /// `v2/environments/ws/{id}` (unpaginated).
    Environments(WorkspaceId),
    /// `v2/splits/ws/{id}` (paginated).
    Splits(WorkspaceId),
}

impl ApiEndpoint {
    /// Relative path of the resource, without a leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Workspaces => "v2/workspaces".to_string(),
            Self::Environments(ws) => format!("v2/environments/ws/{ws}"),
            Self::Splits(ws) => format!("v2/splits/ws/{ws}"),
        }
    }

    /// Whether the endpoint takes `limit`/`offset` and returns a page.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        !matches!(self, Self::Environments(_))
    }

    /// The store collection this endpoint fills.
    #[must_use]
    pub const fn collection(&self) -> CollectionKind {
        match self {
            Self::Workspaces => CollectionKind::Workspaces,
            Self::Environments(_) => CollectionKind::Environments,
            Self::Splits(_) => CollectionKind::Splits,
        }
    }
}
