use serde::Serialize;
use splitdeck_domain::{Environment, Split, Workspace, WorkspaceId};

/// Point-in-time copy of the store's collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreSnapshot {
    /// All workspaces.
    pub workspaces: Vec<Workspace>,
    /// The selected workspace.
    pub current_workspace: Option<WorkspaceId>,
    /// Environments of the last fetched workspace.
    pub environments: Vec<Environment>,
    /// Workspace the environments were fetched for.
    pub environments_workspace: Option<WorkspaceId>,
    /// Splits of the last fetched workspace.
    pub splits: Vec<Split>,
    /// Workspace the splits were fetched for.
    pub splits_workspace: Option<WorkspaceId>,
}
