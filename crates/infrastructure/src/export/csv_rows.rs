//! CSV encoding of the exported collections.
//!
//! One row per entity with a fixed header, so an empty collection still
//! produces a header line.

use serde::Serialize;
use splitdeck_domain::{Environment, Split, Workspace, WorkspaceId};

use super::ExportError;

const WORKSPACE_HEADERS: [&str; 3] = ["ID", "Name", "Requires Title And Comments"];

const ENVIRONMENT_HEADERS: [&str; 4] = ["Workspace", "ID", "Name", "Production"];

const SPLIT_HEADERS: [&str; 10] = [
    "Workspace",
    "ID",
    "Name",
    "Description",
    "Traffic Type ID",
    "Traffic Type Name",
    "Creation Time",
    "Rollout Status ID",
    "Rollout Status Name",
    "Tags",
];

#[derive(Serialize)]
struct WorkspaceRow<'a> {
    id: &'a str,
    name: &'a str,
    requires_title_and_comments: bool,
}

#[derive(Serialize)]
struct EnvironmentRow<'a> {
    workspace: Option<&'a str>,
    id: &'a str,
    name: &'a str,
    production: Option<bool>,
}

#[derive(Serialize)]
struct SplitRow<'a> {
    workspace: Option<&'a str>,
    id: &'a str,
    name: &'a str,
    description: Option<&'a str>,
    traffic_type_id: Option<&'a str>,
    traffic_type_name: Option<&'a str>,
    creation_time: Option<String>,
    rollout_status_id: Option<&'a str>,
    rollout_status_name: Option<&'a str>,
    tags: String,
}

fn encode<R: Serialize>(
    headers: &[&str],
    rows: impl IntoIterator<Item = R>,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}

pub(super) fn workspaces(items: &[Workspace]) -> Result<Vec<u8>, ExportError> {
    encode(
        &WORKSPACE_HEADERS,
        items.iter().map(|w| WorkspaceRow {
            id: w.id.as_str(),
            name: &w.name,
            requires_title_and_comments: w.requires_title_and_comments,
        }),
    )
}

pub(super) fn environments(
    workspace: Option<&WorkspaceId>,
    items: &[Environment],
) -> Result<Vec<u8>, ExportError> {
    encode(
        &ENVIRONMENT_HEADERS,
        items.iter().map(|e| EnvironmentRow {
            workspace: workspace.map(WorkspaceId::as_str),
            id: &e.id,
            name: &e.name,
            production: e.production,
        }),
    )
}

pub(super) fn splits(
    workspace: Option<&WorkspaceId>,
    items: &[Split],
) -> Result<Vec<u8>, ExportError> {
    encode(
        &SPLIT_HEADERS,
        items.iter().map(|s| SplitRow {
            workspace: workspace.map(WorkspaceId::as_str),
            id: &s.id,
            name: &s.name,
            description: s.description.as_deref(),
            traffic_type_id: s.traffic_type.as_ref().map(|t| t.id.as_str()),
            traffic_type_name: s.traffic_type.as_ref().map(|t| t.name.as_str()),
            creation_time: s.created_at().map(|t| t.to_rfc3339()),
            rollout_status_id: s.rollout_status.as_ref().map(|r| r.id.as_str()),
            rollout_status_name: s.rollout_status.as_ref().map(|r| r.name.as_str()),
            tags: s
                .tags
                .iter()
                .flatten()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
        }),
    )
}
