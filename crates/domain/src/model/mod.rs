//! Admin API entities.
//!
//! Every entity keeps the fields the client reasons about as typed
//! members and carries the rest of the server payload in `extra`, so a
//! fetched object can be exported without losing data.

mod environment;
mod split;
mod workspace;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use environment::Environment;
pub use split::{RolloutStatus, Split, Tag, TrafficType};
pub use workspace::Workspace;

/// The collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// All workspaces visible to the credential.
    Workspaces,
    /// Environments of the selected workspace.
    Environments,
    /// Splits of the selected workspace.
    Splits,
}

impl CollectionKind {
    /// Returns the lowercase collection name used in logs and file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workspaces => "workspaces",
            Self::Environments => "environments",
            Self::Splits => "splits",
        }
    }

    /// Returns true if the collection is scoped to a workspace.
    #[must_use]
    pub const fn is_workspace_scoped(&self) -> bool {
        matches!(self, Self::Environments | Self::Splits)
    }

    /// Message shown when the collection has been loaded.
    #[must_use]
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Workspaces => "Got workspaces list!",
            Self::Environments => "Got environments list!",
            Self::Splits => "Got splits list!",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
