use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::WorkspaceId;

/// A named tenant grouping environments and splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Server-assigned id.
    pub id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Whether changes in this workspace need a title and comment.
    #[serde(default)]
    pub requires_title_and_comments: bool,
    /// Remaining server fields, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
