//! HTTP infrastructure utilities.
//!
//! This module provides URL building against the configured API base.

mod url_builder;

pub use url_builder::ApiBaseUrl;
