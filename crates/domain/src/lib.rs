//! Splitdeck Domain - Core business types
//!
//! This crate defines the domain model for the Splitdeck admin client:
//! the Admin API entities, the credential, endpoint paths, pagination
//! arithmetic and the values a fetch produces.
//! All types here are pure Rust with no I/O dependencies.

pub mod credential;
pub mod endpoint;
pub mod error;
pub mod id;
pub mod model;
pub mod notification;
pub mod outcome;
pub mod page;
pub mod request;
pub mod response;
pub mod settings;
pub mod state;

pub use credential::ApiKey;
pub use endpoint::ApiEndpoint;
pub use error::{DomainError, DomainResult};
pub use id::{WorkspaceId, generate_run_id};
pub use model::{
    CollectionKind, Environment, RolloutStatus, Split, Tag, TrafficType, Workspace,
};
pub use notification::{Notification, NotificationLevel};
pub use outcome::{FailureCause, FetchFailure, FetchOutcome, OutcomeKind};
pub use page::{DEFAULT_PAGE_SIZE, Page, PageCursor, PageRequest};
pub use request::ApiRequest;
pub use response::{ApiResponse, StatusCode};
pub use settings::{ClientSettings, CommitPolicy, DEFAULT_BASE_URL};
pub use state::LoadState;
