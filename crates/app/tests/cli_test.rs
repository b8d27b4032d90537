//! End-to-end runs of the CLI against a local Admin API stub.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use splitdeck::{Cli, ExitStatus, run};
use tempfile::TempDir;

const KEY: &str = "cli-test-key";

#[derive(Clone, Default)]
struct Stub {
    requests: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    fn authorize(&self, uri: String, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
        self.requests.lock().unwrap().push(uri);
        let expected = format!("Bearer {KEY}");
        match headers.get(header::AUTHORIZATION) {
            Some(value) if value.as_bytes() == expected.as_bytes() => Ok(()),
            _ => Err((StatusCode::UNAUTHORIZED, "unauthorized".to_string())),
        }
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn paged(total: u64, query: &HashMap<String, String>, item: impl Fn(u64) -> Value) -> Value {
    let limit: u64 = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(10);
    let offset: u64 = query.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let objects: Vec<Value> = (offset..total.min(offset + limit)).map(item).collect();
    json!({"objects": objects, "offset": offset, "limit": limit, "totalCount": total})
}

async fn workspaces(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, String)> {
    stub.authorize("workspaces".to_string(), &headers)?;
    Ok(Json(paged(12, &query, |i| {
        json!({"id": format!("ws-{i}"), "name": format!("Workspace {i}")})
    })))
}

async fn environments(
    State(stub): State<Stub>,
    Path(workspace): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, String)> {
    stub.authorize(format!("environments/{workspace}"), &headers)?;
    Ok(Json(json!([
        {"id": "env-prod", "name": "Production", "production": true},
        {"id": "env-stg", "name": "Staging", "production": false},
    ])))
}

async fn splits(
    State(stub): State<Stub>,
    Path(workspace): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, String)> {
    stub.authorize(format!("splits/{workspace}"), &headers)?;
    if workspace == "broken" && query.get("offset").map(String::as_str) == Some("5") {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "upstream failure".to_string()));
    }
    Ok(Json(paged(7, &query, |i| {
        json!({
            "id": format!("split-{i}"),
            "name": format!("flag_{i}"),
            "trafficType": {"id": "tt-1", "name": "user"},
            "rolloutStatus": {"id": "rs-1", "name": "Ramping"},
        })
    })))
}

async fn spawn_stub() -> (Stub, SocketAddr) {
    let stub = Stub::default();
    let app = Router::new()
        .route("/api/v2/workspaces", get(workspaces))
        .route("/api/v2/environments/ws/{workspace}", get(environments))
        .route("/api/v2/splits/ws/{workspace}", get(splits))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (stub, addr)
}

struct Harness {
    stub: Stub,
    addr: SocketAddr,
    dir: TempDir,
}

impl Harness {
    async fn start() -> Self {
        let (stub, addr) = spawn_stub().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "page_size: 5\n").unwrap();
        Self { stub, addr, dir }
    }

    fn cli(&self, args: &[&str]) -> Cli {
        let base_url = format!("http://{}/api", self.addr);
        let config = self.dir.path().join("config.yaml");
        let mut argv = vec![
            "splitdeck".to_string(),
            "--base-url".to_string(),
            base_url,
            "--config".to_string(),
            config.display().to_string(),
            "--api-key".to_string(),
            KEY.to_string(),
        ];
        argv.extend(args.iter().map(|arg| (*arg).to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    async fn run(&self, cli: Cli) -> (ExitStatus, String) {
        let mut out = Vec::new();
        let status = run(cli, &mut out).await.unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    fn out_dir(&self) -> PathBuf {
        self.dir.path().join("export")
    }
}

#[tokio::test]
async fn test_workspaces_lists_every_page() {
    let harness = Harness::start().await;

    let (status, out) = harness.run(harness.cli(&["workspaces"])).await;

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(out.lines().count(), 12);
    assert_eq!(out.lines().next(), Some("ws-0\tWorkspace 0"));
    assert_eq!(harness.stub.count(), 3);
}

#[tokio::test]
async fn test_environments_json_output() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["--json", "environments", "--workspace", "ws-3"]))
        .await;

    assert_eq!(status, ExitStatus::Success);
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["report"]["collection"], "environments");
    assert_eq!(value["report"]["committed"], true);
    assert_eq!(value["items"][0]["id"], "env-prod");
    assert_eq!(value["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_partial_splits_are_discarded_by_default() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["splits", "--workspace", "broken"]))
        .await;

    assert_eq!(status, ExitStatus::Failure);
    assert_eq!(out, "");
    assert_eq!(harness.stub.count(), 2);
}

#[tokio::test]
async fn test_keep_partial_prints_what_was_read() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["splits", "--workspace", "broken", "--keep-partial"]))
        .await;

    assert_eq!(status, ExitStatus::Failure);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "flag_0\tuser\tRamping");
    assert_eq!(lines[5], "(incomplete: 5 splits read)");
}

#[tokio::test]
async fn test_missing_credential_sends_no_request() {
    let harness = Harness::start().await;
    let mut cli = harness.cli(&["workspaces"]);
    cli.api_key = None;

    let (status, out) = harness.run(cli).await;

    assert_eq!(status, ExitStatus::Usage);
    assert_eq!(out, "");
    assert_eq!(harness.stub.count(), 0);
}

#[tokio::test]
async fn test_wrong_credential_is_a_fetch_failure() {
    let harness = Harness::start().await;
    let mut cli = harness.cli(&["workspaces"]);
    cli.api_key = Some("not-the-key".to_string());

    let (status, _) = harness.run(cli).await;

    assert_eq!(status, ExitStatus::Failure);
    assert_eq!(harness.stub.count(), 1);
}

#[tokio::test]
async fn test_export_writes_all_collections() {
    let harness = Harness::start().await;
    let out_dir = harness.out_dir();
    let out_arg = out_dir.display().to_string();

    let (status, out) = harness
        .run(harness.cli(&["export", "--workspace", "ws-1", "--out", &out_arg]))
        .await;

    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("wrote "));

    let read = |name: &str| -> Value {
        serde_json::from_slice(&std::fs::read(out_dir.join(name)).unwrap()).unwrap()
    };
    assert_eq!(read("workspaces_data.json").as_array().map(Vec::len), Some(12));
    assert_eq!(read("environments_data.json").as_array().map(Vec::len), Some(2));
    assert_eq!(read("splits_data.json").as_array().map(Vec::len), Some(7));

    let everything = ["workspaces_data.json", "environments_data.json", "splits_data.json"]
        .iter()
        .map(|name| std::fs::read_to_string(out_dir.join(name)).unwrap())
        .collect::<String>();
    assert!(!everything.contains(KEY));
}

#[tokio::test]
async fn test_export_skips_files_when_a_collection_fails() {
    let harness = Harness::start().await;
    let out_dir = harness.out_dir();
    let out_arg = out_dir.display().to_string();

    let (status, _) = harness
        .run(harness.cli(&["export", "--workspace", "broken", "--out", &out_arg]))
        .await;

    assert_eq!(status, ExitStatus::Failure);
    assert!(!out_dir.join("workspaces_data.json").exists());
}

#[tokio::test]
async fn test_invalid_page_size_is_rejected_before_any_request() {
    let harness = Harness::start().await;

    let mut out = Vec::new();
    let result = run(harness.cli(&["workspaces", "--page-size", "0"]), &mut out).await;

    assert!(result.is_err());
    assert_eq!(harness.stub.count(), 0);
}

#[tokio::test]
async fn test_search_workspace_by_name() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["search", "workspace", "Workspace 7"]))
        .await;

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(out, "ws-7\tWorkspace 7\n");
}

#[tokio::test]
async fn test_search_split_in_workspace() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["--json", "search", "split", "flag_3", "-w", "ws-1"]))
        .await;

    assert_eq!(status, ExitStatus::Success);
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["report"]["collection"], "splits");
    assert_eq!(value["matches"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["matches"][0]["id"], "split-3");
}

#[tokio::test]
async fn test_search_reports_no_match() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["search", "environment", "Development", "-w", "ws-1"]))
        .await;

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(out, "no match for 'Development' in environments\n");
}

#[tokio::test]
async fn test_scoped_search_needs_a_workspace() {
    let harness = Harness::start().await;

    let (status, out) = harness
        .run(harness.cli(&["search", "environment", "Staging"]))
        .await;

    assert_eq!(status, ExitStatus::Usage);
    assert_eq!(out, "");
    assert_eq!(harness.stub.count(), 0);
}

#[tokio::test]
async fn test_export_as_csv() {
    let harness = Harness::start().await;
    let out_dir = harness.out_dir();
    let out_arg = out_dir.display().to_string();

    let (status, out) = harness
        .run(harness.cli(&[
            "export",
            "--workspace",
            "ws-1",
            "--out",
            &out_arg,
            "--format",
            "csv",
        ]))
        .await;

    assert_eq!(status, ExitStatus::Success);
    assert!(out.contains("splits_data.csv"));
    assert!(!out_dir.join("splits_data.json").exists());

    let read = |name: &str| std::fs::read_to_string(out_dir.join(name)).unwrap();
    let workspaces = read("workspaces_data.csv");
    assert_eq!(workspaces.lines().count(), 13);
    assert_eq!(workspaces.lines().nth(1), Some("ws-0,Workspace 0,false"));

    let environments = read("environments_data.csv");
    assert_eq!(
        environments.lines().nth(1),
        Some("ws-1,env-prod,Production,true")
    );

    let splits = read("splits_data.csv");
    assert_eq!(splits.lines().count(), 8);
    assert!(splits.starts_with("Workspace,ID,Name,Description,"));
    assert_eq!(
        splits.lines().nth(1),
        Some("ws-1,split-0,flag_0,,tt-1,user,,rs-1,Ramping,")
    );
}

#[tokio::test]
async fn test_unwritable_export_is_a_failure() {
    let harness = Harness::start().await;
    let blocker = harness.dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let out_arg = blocker.join("export").display().to_string();

    let mut out = Vec::new();
    let err = run(
        harness.cli(&["export", "--workspace", "ws-1", "--out", &out_arg]),
        &mut out,
    )
    .await
    .unwrap_err();

    assert_eq!(ExitStatus::for_error(&err), ExitStatus::Failure);
}
