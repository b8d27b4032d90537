//! Splitdeck Application - Use cases, ports and the store
//!
//! This crate defines the application layer with:
//! - Port traits (transport, notifier, clock)
//! - The paginated and single-resource fetch routines
//! - The explicit, injectable admin store and the actions that fill it
//! - Application-level error handling

pub mod actions;
pub mod error;
pub mod ports;
pub mod store;
pub mod use_cases;

pub use actions::{FetchReport, StoreActions};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{ApiTransport, Clock, HttpClientError, Notifier};
pub use store::{AdminStore, StoreEvent, StoreField, StoreSnapshot};
pub use use_cases::{FetchResource, PaginatedFetch};

#[cfg(test)]
mod testing;
