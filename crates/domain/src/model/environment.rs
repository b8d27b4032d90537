use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A deployment context (staging, production, ...) inside one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Server-assigned id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this is a production environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<bool>,
    /// Remaining server fields, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
