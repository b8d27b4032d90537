//! Splitdeck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading and
//! snapshot export.

pub mod adapters;
pub mod config;
pub mod export;
pub mod http;
pub mod serialization;

pub use adapters::{ReqwestApiClient, SystemClock, TracingNotifier};
pub use config::{ConfigError, ConfigLoader};
pub use export::{ExportError, ExportFormat, SnapshotExporter};
pub use http::ApiBaseUrl;
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
