//! Client settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Admin API base used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.split.io/internal/api/";

/// What to do with the items of a fetch that stopped part-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Only commit fully read collections; a partial read leaves the
    /// previous collection in place and records an error.
    #[default]
    CompleteOnly,
    /// Commit whatever was read and mark the collection incomplete.
    KeepPartial,
}

impl CommitPolicy {
    /// Returns the policy name as written in config files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CompleteOnly => "complete_only",
            Self::KeepPartial => "keep_partial",
        }
    }
}

impl fmt::Display for CommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "complete_only" => Ok(Self::CompleteOnly),
            "keep_partial" => Ok(Self::KeepPartial),
            _ => Err(DomainError::UnknownCommitPolicy(s.to_string())),
        }
    }
}

/// Settings shared by the transport and the store actions.
///
/// The API key is deliberately absent: it is never read from or written
/// to a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL every endpoint path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Items requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Handling of partially read collections.
    #[serde(default)]
    pub commit_policy: CommitPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            commit_policy: CommitPolicy::default(),
        }
    }
}

impl ClientSettings {
    /// Checks that the settings can be used.
    ///
    /// # Errors
    ///
    /// Returns an error for a base URL that is not absolute http(s), or a
    /// page size outside `1..=MAX_PAGE_SIZE`.
    pub fn validate(&self) -> DomainResult<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "base URL must use http or https: {}",
                self.base_url
            )));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}
