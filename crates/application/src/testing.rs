//! Test doubles shared by the unit tests of this crate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::{Value, json};
use splitdeck_domain::{ApiKey, ApiRequest, ApiResponse, Notification};

use crate::ports::{ApiTransport, Clock, HttpClientError, Notifier};

pub fn api_key() -> ApiKey {
    ApiKey::new("test-key").unwrap()
}

#[derive(Clone, Copy)]
enum Dataset {
    Workspaces,
    Environments,
    Splits,
}

#[derive(Clone, Copy)]
enum Fault {
    Status(u16),
    Unreachable,
}

/// In-memory Admin API serving generated collections.
///
/// Item ids embed the workspace id taken from the request path, so
/// collections of different workspaces can be told apart.
pub struct PagedApi {
    dataset: Dataset,
    total: usize,
    faults: HashMap<u64, Fault>,
    malformed: bool,
    requests: Mutex<Vec<ApiRequest>>,
}

impl PagedApi {
    fn new(dataset: Dataset, total: usize) -> Self {
        Self {
            dataset,
            total,
            faults: HashMap::new(),
            malformed: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_workspaces(total: usize) -> Self {
        Self::new(Dataset::Workspaces, total)
    }

    pub fn with_environments(total: usize) -> Self {
        Self::new(Dataset::Environments, total)
    }

    pub fn with_splits(total: usize) -> Self {
        Self::new(Dataset::Splits, total)
    }

    pub fn failing_at(mut self, offset: u64, status: u16) -> Self {
        self.faults.insert(offset, Fault::Status(status));
        self
    }

    pub fn unreachable_at(mut self, offset: u64) -> Self {
        self.faults.insert(offset, Fault::Unreachable);
        self
    }

    pub const fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn offsets(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .map(|r| r.query_param("offset").map_or(0, |o| o.parse().unwrap()))
            .collect()
    }

    fn item(&self, scope: &str, index: usize) -> Value {
        match self.dataset {
            Dataset::Workspaces => json!({
                "id": format!("ws-{index}"),
                "name": format!("workspace-{index}"),
            }),
            Dataset::Environments => json!({
                "id": format!("{scope}-env-{index}"),
                "name": format!("env-{index}"),
            }),
            Dataset::Splits => json!({
                "id": format!("{scope}-split-{index}"),
                "name": format!("split-{index}"),
            }),
        }
    }
}

#[async_trait]
impl ApiTransport for PagedApi {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse, HttpClientError> {
        self.requests.lock().push(request.clone());
        // Let concurrent runs interleave at every request.
        tokio::task::yield_now().await;

        let offset: u64 = request
            .query_param("offset")
            .map_or(0, |o| o.parse().unwrap());
        match self.faults.get(&offset) {
            Some(Fault::Status(status)) => {
                return Ok(ApiResponse::new(*status, b"{\"message\":\"nope\"}".to_vec()));
            }
            Some(Fault::Unreachable) => {
                return Err(HttpClientError::ConnectionFailed("unreachable".to_string()));
            }
            None => {}
        }
        if self.malformed {
            return Ok(ApiResponse::new(200, b"<html>".to_vec()));
        }

        let scope = request.path.rsplit('/').next().unwrap_or_default();
        let body = match self.dataset {
            Dataset::Environments => {
                let items: Vec<Value> = (0..self.total).map(|i| self.item(scope, i)).collect();
                Value::from(items)
            }
            Dataset::Workspaces | Dataset::Splits => {
                let limit: usize = request
                    .query_param("limit")
                    .map_or(self.total, |l| l.parse().unwrap());
                let start = usize::try_from(offset).unwrap().min(self.total);
                let end = (start + limit).min(self.total);
                let objects: Vec<Value> = (start..end).map(|i| self.item(scope, i)).collect();
                json!({
                    "objects": objects,
                    "offset": offset,
                    "limit": limit,
                    "totalCount": self.total,
                })
            }
        };
        Ok(ApiResponse::new(200, serde_json::to_vec(&body).unwrap()))
    }
}

/// Notifier that keeps every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
