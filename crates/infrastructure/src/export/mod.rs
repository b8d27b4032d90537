//! Export infrastructure.
//!
//! Writes the collections held by the store as `{collection}_data.json`
//! files (one JSON array per collection) or as `{collection}_data.csv`
//! files with one row per entity.

mod csv_rows;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use splitdeck_application::StoreSnapshot;
use splitdeck_domain::CollectionKind;
use thiserror::Error;
use tokio::fs;

use crate::serialization::{SerializationError, to_json_stable_bytes};

/// Export error type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The output directory or file could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// On-disk format of exported collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// One pretty-printed JSON array per collection.
    #[default]
    Json,
    /// One CSV table per collection, header row first.
    Csv,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// File name used for a collection.
    #[must_use]
    pub fn file_name(self, kind: CollectionKind) -> String {
        format!("{}_data.{}", kind.as_str(), self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes store snapshots into an output directory.
#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    out_dir: PathBuf,
    format: ExportFormat,
}

impl SnapshotExporter {
    /// Creates a JSON exporter writing into `out_dir`.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            format: ExportFormat::Json,
        }
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Output format.
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Writes all three collections of `snapshot`, creating the output
    /// directory if needed. Returns the written paths in collection order.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or any write fails.
    pub async fn export(&self, snapshot: &StoreSnapshot) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| ExportError::Io {
                path: self.out_dir.clone(),
                source: e,
            })?;

        match self.format {
            ExportFormat::Json => Ok(vec![
                self.write_collection(CollectionKind::Workspaces, &snapshot.workspaces)
                    .await?,
                self.write_collection(CollectionKind::Environments, &snapshot.environments)
                    .await?,
                self.write_collection(CollectionKind::Splits, &snapshot.splits)
                    .await?,
            ]),
            ExportFormat::Csv => {
                let workspaces = csv_rows::workspaces(&snapshot.workspaces)?;
                let environments = csv_rows::environments(
                    snapshot.environments_workspace.as_ref(),
                    &snapshot.environments,
                )?;
                let splits =
                    csv_rows::splits(snapshot.splits_workspace.as_ref(), &snapshot.splits)?;
                Ok(vec![
                    self.write_file(
                        CollectionKind::Workspaces,
                        snapshot.workspaces.len(),
                        workspaces,
                    )
                    .await?,
                    self.write_file(
                        CollectionKind::Environments,
                        snapshot.environments.len(),
                        environments,
                    )
                    .await?,
                    self.write_file(CollectionKind::Splits, snapshot.splits.len(), splits)
                        .await?,
                ])
            }
        }
    }

    /// Writes one collection as a JSON array, whatever the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn write_collection<T: Serialize + Sync>(
        &self,
        kind: CollectionKind,
        items: &[T],
    ) -> Result<PathBuf, ExportError> {
        let bytes = to_json_stable_bytes(&items)?;
        let path = self.out_dir.join(ExportFormat::Json.file_name(kind));
        self.write_path(path, kind, items.len(), bytes).await
    }

    async fn write_file(
        &self,
        kind: CollectionKind,
        count: usize,
        bytes: Vec<u8>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.out_dir.join(self.format.file_name(kind));
        self.write_path(path, kind, count, bytes).await
    }

    async fn write_path(
        &self,
        path: PathBuf,
        kind: CollectionKind,
        count: usize,
        bytes: Vec<u8>,
    ) -> Result<PathBuf, ExportError> {
        fs::write(&path, bytes).await.map_err(|e| ExportError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(
            collection = %kind,
            count,
            format = %self.format,
            path = %path.display(),
            "exported"
        );
        Ok(path)
    }
}
